use super::fake_api::{routes, Store, StoreData};
use actix_web::{web, App, HttpServer};
use petcare_sdk::PetcareSDK;
use std::net::TcpListener;
use std::sync::Mutex;

pub struct TestApp {
    pub store: StoreData,
}

// Launch a fake petcare api as a background task
pub async fn spawn_app() -> (TestApp, PetcareSDK, String) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let store: StoreData = web::Data::new(Mutex::new(Store::default()));
    let app_store = store.clone();
    let server = HttpServer::new(move || App::new().app_data(app_store.clone()).configure(routes))
        .workers(1)
        .listen(listener)
        .expect("Failed to build fake api")
        .run();

    let address = format!("http://127.0.0.1:{}", port);
    let _ = actix_web::rt::spawn(server);

    let app = TestApp { store };
    let sdk = PetcareSDK::new(address.clone());
    (app, sdk, address)
}
