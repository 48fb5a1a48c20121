use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use petcare_api_structs::{
    get_pet, update_pet, update_pet_photos, upload_pet_photo, PetEventsPathParams,
};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

pub const MAX_TITLE_LENGTH: usize = 50;
const MAX_PHOTOS: usize = 4;
const EVENT_KINDS: [&str; 3] = ["doctor-visit", "vaccine", "treatment"];

/// In memory stand-in for the petcare api
#[derive(Default)]
pub struct Store {
    next_id: i64,
    pub pets: BTreeMap<i64, Value>,
    /// Event id -> (kind, event)
    pub events: BTreeMap<i64, (String, Value)>,
    /// Raw multipart bodies received by the photo endpoints
    pub multipart_bodies: Vec<String>,
    /// Query strings received by the upload endpoint
    pub upload_queries: Vec<HashMap<String, String>>,
    /// Answer 404 on the upcoming events endpoint, like older servers do
    pub without_upcoming_endpoint: bool,
}

impl Store {
    fn new_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type StoreData = web::Data<Mutex<Store>>;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/pets").route(web::post().to(create_pet)))
        .service(
            web::resource("/api/pets/{pet_id}")
                .route(web::get().to(get_pet))
                .route(web::put().to(update_pet)),
        )
        .service(web::resource("/api/pets/{pet_id}/upload").route(web::post().to(upload_photo)))
        .service(web::resource("/api/pets/{pet_id}/photos").route(web::put().to(update_photos)))
        .service(
            web::resource("/api/events/upcoming/{petId}").route(web::get().to(upcoming_events)),
        )
        .service(web::resource("/api/events/past/{petId}").route(web::get().to(past_events)))
        .service(web::resource("/api/{kind}").route(web::post().to(create_event)))
        .service(
            web::resource("/api/{kind}/{event_id}")
                .route(web::get().to(get_event))
                .route(web::put().to(update_event))
                .route(web::delete().to(delete_event)),
        );
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().body("Not Found")
}

fn merge(target: &mut Value, changes: Value) {
    if let (Some(target), Value::Object(changes)) = (target.as_object_mut(), changes) {
        for (key, value) in changes {
            target.insert(key, value);
        }
    }
}

async fn create_pet(store: StoreData, body: web::Json<Value>) -> HttpResponse {
    let mut store = store.lock().unwrap();
    let id = store.new_id();
    let mut pet = json!({ "id": id, "photos": [] });
    merge(&mut pet, body.into_inner());
    store.pets.insert(id, pet);
    HttpResponse::Ok().json(id)
}

async fn get_pet(store: StoreData, path: web::Path<get_pet::PathParams>) -> HttpResponse {
    let store = store.lock().unwrap();
    match store.pets.get(&path.pet_id.inner()) {
        Some(pet) => HttpResponse::Ok().json(pet),
        None => not_found(),
    }
}

async fn update_pet(
    store: StoreData,
    path: web::Path<update_pet::PathParams>,
    body: web::Json<Value>,
) -> HttpResponse {
    let mut store = store.lock().unwrap();
    match store.pets.get_mut(&path.pet_id.inner()) {
        Some(pet) => {
            merge(pet, body.into_inner());
            HttpResponse::Ok().json(json!({ "success": true }))
        }
        None => not_found(),
    }
}

fn photos_of(pet: &mut Value) -> &mut Vec<Value> {
    if !pet["photos"].is_array() {
        pet["photos"] = json!([]);
    }
    pet["photos"].as_array_mut().unwrap()
}

/// Text values of the multipart fields named `name`
fn multipart_values(body: &str, name: &str) -> Vec<String> {
    body.split(&format!("name=\"{}\"", name))
        .skip(1)
        .filter_map(|part| {
            let value = part.split("\r\n\r\n").nth(1)?;
            value.split("\r\n").next().map(|v| v.to_string())
        })
        .collect()
}

async fn upload_photo(
    store: StoreData,
    path: web::Path<upload_pet_photo::PathParams>,
    query: web::Query<HashMap<String, String>>,
    body: web::Bytes,
) -> HttpResponse {
    let mut guard = store.lock().unwrap();
    let store = &mut *guard;
    let body = String::from_utf8_lossy(&body).to_string();
    let query = query.into_inner();
    store.multipart_bodies.push(body.clone());
    store.upload_queries.push(query.clone());

    let pet_id = path.pet_id.inner();
    if !store.pets.contains_key(&pet_id) {
        return not_found();
    }
    if !body.contains("name=\"file\"") {
        return HttpResponse::BadRequest().body("File is missing");
    }
    let photo_id = store.new_id();
    let pet = match store.pets.get_mut(&pet_id) {
        Some(pet) => pet,
        None => return not_found(),
    };
    let photos = photos_of(pet);
    if photos.len() >= MAX_PHOTOS {
        return HttpResponse::BadRequest().finish();
    }
    let url = format!("/uploads/pets/{}/{}.jpg", pet_id, photo_id);
    photos.push(json!({
        "id": photo_id,
        "url": url,
        "telegramFileId": query.get("telegramFileId"),
    }));
    HttpResponse::Ok().json(json!({ "id": photo_id, "url": url }))
}

async fn update_photos(
    store: StoreData,
    path: web::Path<update_pet_photos::PathParams>,
    body: web::Bytes,
) -> HttpResponse {
    let mut guard = store.lock().unwrap();
    let store = &mut *guard;
    let body = String::from_utf8_lossy(&body).to_string();
    store.multipart_bodies.push(body.clone());

    let pet_id = path.pet_id.inner();
    let new_files = body.matches("name=\"newFiles\"").count();
    let new_ids = (0..new_files).map(|_| store.new_id()).collect::<Vec<_>>();
    let delete_ids = multipart_values(&body, "deletePhotoIds")
        .iter()
        .filter_map(|id| id.trim().parse::<i64>().ok())
        .collect::<Vec<_>>();

    let pet = match store.pets.get_mut(&pet_id) {
        Some(pet) => pet,
        None => return not_found(),
    };
    let photos = photos_of(pet);
    photos.retain(|photo| {
        photo["id"]
            .as_i64()
            .map(|id| !delete_ids.contains(&id))
            .unwrap_or(true)
    });
    for id in new_ids {
        photos.push(json!({
            "id": id,
            "url": format!("/uploads/pets/{}/{}.jpg", pet_id, id),
        }));
    }
    HttpResponse::Ok().json(json!({ "success": true }))
}

fn known_kind(kind: &str) -> bool {
    EVENT_KINDS.contains(&kind)
}

async fn create_event(
    store: StoreData,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let kind = path.into_inner();
    if !known_kind(&kind) {
        return not_found();
    }
    let body = body.into_inner();
    let title_length = body["title"].as_str().map(|t| t.chars().count()).unwrap_or(0);
    if title_length > MAX_TITLE_LENGTH {
        return HttpResponse::BadRequest()
            .json(json!({ "statusCode": 400, "message": "Title is too long" }));
    }
    let mut store = store.lock().unwrap();
    let id = store.new_id();
    let mut event = json!({ "id": id });
    merge(&mut event, body);
    store.events.insert(id, (kind, event));
    HttpResponse::Ok().json(id)
}

async fn get_event(store: StoreData, path: web::Path<(String, i64)>) -> HttpResponse {
    let (kind, id) = path.into_inner();
    let store = store.lock().unwrap();
    match store.events.get(&id) {
        Some((k, event)) if *k == kind => HttpResponse::Ok().json(event),
        _ => not_found(),
    }
}

async fn update_event(
    store: StoreData,
    path: web::Path<(String, i64)>,
    body: web::Json<Value>,
) -> HttpResponse {
    let (kind, id) = path.into_inner();
    let mut store = store.lock().unwrap();
    match store.events.get_mut(&id) {
        Some((k, event)) if *k == kind => {
            merge(event, body.into_inner());
            HttpResponse::Ok().json(json!({ "success": true }))
        }
        _ => not_found(),
    }
}

async fn delete_event(store: StoreData, path: web::Path<(String, i64)>) -> HttpResponse {
    let (kind, id) = path.into_inner();
    let mut store = store.lock().unwrap();
    match store.events.get(&id) {
        Some((k, _)) if *k == kind => {
            store.events.remove(&id);
            HttpResponse::NoContent().finish()
        }
        _ => not_found(),
    }
}

fn event_date(event: &Value) -> Option<DateTime<Utc>> {
    event["eventDate"].as_str()?.parse().ok()
}

/// Events of a pet as list entries, oldest first
fn summaries<F: Fn(DateTime<Utc>) -> bool>(store: &Store, pet_id: i64, filter: F) -> Vec<Value> {
    let mut events = store
        .events
        .values()
        .filter(|(_, event)| event["petId"].as_i64() == Some(pet_id))
        .filter_map(|(kind, event)| {
            let date = event_date(event)?;
            if !filter(date) {
                return None;
            }
            let mut summary = Map::new();
            summary.insert("type".into(), json!(kind));
            for key in [
                "id",
                "title",
                "eventDate",
                "reminderEnabled",
                "clinic",
                "doctor",
                "medicine",
                "nextVaccinationDate",
                "remedy",
                "parasite",
                "nextTreatmentDate",
            ]
            .iter()
            {
                if !event[*key].is_null() {
                    summary.insert(key.to_string(), event[*key].clone());
                }
            }
            Some((date, Value::Object(summary)))
        })
        .collect::<Vec<_>>();
    events.sort_by_key(|(date, _)| *date);
    events.into_iter().map(|(_, summary)| summary).collect()
}

async fn upcoming_events(store: StoreData, path: web::Path<PetEventsPathParams>) -> HttpResponse {
    let store = store.lock().unwrap();
    if store.without_upcoming_endpoint {
        return not_found();
    }
    let now = Utc::now();
    HttpResponse::Ok().json(summaries(&store, path.pet_id.inner(), |date| date > now))
}

async fn past_events(store: StoreData, path: web::Path<PetEventsPathParams>) -> HttpResponse {
    let store = store.lock().unwrap();
    let now = Utc::now();
    let mut events = summaries(&store, path.pet_id.inner(), |date| date <= now);
    events.reverse();
    HttpResponse::Ok().json(events)
}
