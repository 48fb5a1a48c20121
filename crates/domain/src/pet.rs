use crate::{
    date::{parse_date, InvalidDateError},
    shared::entity::{Entity, ID},
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: ID,
    pub name: String,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    pub owner_id: ID,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl Entity for Pet {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Pet {
    /// How many more photos can be attached before hitting `MAX_PHOTOS`
    pub fn remaining_photo_slots(&self) -> usize {
        MAX_PHOTOS.saturating_sub(self.photos.len())
    }

    /// Full years the pet has lived on `today`, `None` without a birth date
    pub fn age_in_years(&self, today: NaiveDate) -> Option<u32> {
        let birth_date = self.birth_date?;
        let mut years = today.year() - birth_date.year();
        if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: ID,
    pub url: String,
    /// Reference to the same file in Telegram, when it was uploaded from there
    #[serde(default)]
    pub telegram_file_id: Option<String>,
}

impl Entity for Photo {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Photo {
    /// The api returns server relative urls for files it hosts itself
    pub fn resolve_url(&self, base_url: &str) -> String {
        if self.url.starts_with("http") {
            self.url.clone()
        } else {
            format!("{}{}", base_url.trim_end_matches('/'), self.url)
        }
    }
}

pub const MAX_PHOTOS: usize = 4;
pub const MAX_PHOTO_SIZE: usize = 10 * 1024 * 1024;
pub const ACCEPTED_PHOTO_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

#[derive(Error, Debug, PartialEq)]
pub enum PhotoValidationError {
    #[error("The file must not be larger than {} MB", MAX_PHOTO_SIZE / 1024 / 1024)]
    TooLarge,
    #[error("Choose an image file")]
    InvalidType,
    #[error("Photo limit exceeded (max {})", MAX_PHOTOS)]
    LimitExceeded,
}

pub fn validate_photo(size: usize, content_type: &str) -> Result<(), PhotoValidationError> {
    if !ACCEPTED_PHOTO_TYPES.contains(&content_type) {
        return Err(PhotoValidationError::InvalidType);
    }
    if size > MAX_PHOTO_SIZE {
        return Err(PhotoValidationError::TooLarge);
    }
    Ok(())
}

/// Checks that a pet having `existing` photos can receive `added` more
/// while `removed` of the existing ones get deleted
pub fn check_photo_capacity(
    existing: usize,
    added: usize,
    removed: usize,
) -> Result<(), PhotoValidationError> {
    if existing.saturating_sub(removed) + added > MAX_PHOTOS {
        return Err(PhotoValidationError::LimitExceeded);
    }
    Ok(())
}

/// Guesses the content type of an image from its file name
pub fn content_type_for_file_name(file_name: &str) -> Option<&'static str> {
    let extension = file_name.rsplit('.').next()?.to_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Raw values of the edit pet form
#[derive(Debug, Clone, Default)]
pub struct PetForm {
    pub name: String,
    pub breed: String,
    pub weight_kg: String,
    pub birth_date: String,
}

/// The fields of a `Pet` a partial update touches. `None` means unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetChanges {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub weight_kg: Option<f64>,
    pub birth_date: Option<NaiveDate>,
}

impl PetChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl PetForm {
    pub fn from_pet(pet: &Pet) -> Self {
        Self {
            name: pet.name.clone(),
            breed: pet.breed.clone().unwrap_or_default(),
            weight_kg: pet.weight_kg.map(|w| w.to_string()).unwrap_or_default(),
            birth_date: pet
                .birth_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    /// Blank text fields are left unchanged and a weight is only sent when it
    /// is a positive number. A malformed birth date is an error.
    pub fn into_changes(self) -> Result<PetChanges, InvalidDateError> {
        let name = Some(self.name.trim().to_string()).filter(|s| !s.is_empty());
        let breed = Some(self.breed.trim().to_string()).filter(|s| !s.is_empty());
        let weight_kg = self
            .weight_kg
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite() && *w > 0.0);
        let birth_date = match self.birth_date.trim() {
            "" => None,
            date => Some(parse_date(date)?),
        };
        Ok(PetChanges {
            name,
            breed,
            weight_kg,
            birth_date,
        })
    }
}
