use chrono::{DateTime, Duration, TimeZone, Utc};
use petcare_sdk::{CreatePetInput, EventInput, PetcareSDK, PhotoFile, ReminderSettings, Tz, ID};

pub const OWNER_ID: i64 = 42;

pub fn pet_input(name: &str) -> CreatePetInput {
    CreatePetInput {
        name: name.into(),
        breed: Some("Sphynx".into()),
        weight_kg: Some(4.0),
        birth_date: None,
        owner_id: ID::new(OWNER_ID),
    }
}

pub async fn create_pet(sdk: &PetcareSDK) -> ID {
    sdk.pet
        .create(pet_input("Sonya"))
        .await
        .expect("Expected to create pet")
}

pub fn photo(name: &str) -> PhotoFile {
    PhotoFile::new(name, b"not really an image".to_vec()).expect("Expected a supported image")
}

/// Wall clock time `days` from now in UTC, truncated to whole minutes
pub fn days_from_now(days: i64) -> DateTime<Tz> {
    let timestamp = (Utc::now() + Duration::days(days)).timestamp();
    Utc.timestamp_opt(timestamp - timestamp.rem_euclid(60), 0)
        .unwrap()
        .with_timezone(&Tz::UTC)
}

pub fn event_input(pet_id: ID, event_date: DateTime<Tz>) -> EventInput {
    EventInput {
        pet_id,
        title: None,
        event_date,
        reminder: ReminderSettings::disabled(),
    }
}
