use crate::{
    base::{APIError, APIResponse, BaseClient},
    notify::PetChangeNotifier,
    shared::PhotoFile,
};
use chrono::NaiveDate;
use petcare_api_structs::*;
use petcare_domain::{check_photo_capacity, PetChanges, MAX_PHOTOS, ID};
use reqwest::{multipart::Form, StatusCode};
use std::sync::Arc;

const PET_NOT_FOUND: &str = "Pet not found";

#[derive(Clone)]
pub struct PetClient {
    base: Arc<BaseClient>,
    notifier: PetChangeNotifier,
}

pub struct CreatePetInput {
    pub name: String,
    pub breed: Option<String>,
    pub weight_kg: Option<f64>,
    pub birth_date: Option<NaiveDate>,
    pub owner_id: ID,
}

pub struct UploadPhotoInput {
    pub pet_id: ID,
    pub photo: PhotoFile,
    pub telegram_file_id: Option<String>,
}

pub struct UpdatePhotosInput {
    pub pet_id: ID,
    pub new_files: Vec<PhotoFile>,
    pub delete_photo_ids: Vec<ID>,
}

impl PetClient {
    pub(crate) fn new(base: Arc<BaseClient>, notifier: PetChangeNotifier) -> Self {
        Self { base, notifier }
    }

    pub async fn create(&self, input: CreatePetInput) -> APIResponse<create_pet::APIResponse> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(APIError::InvalidInput("The pet name is required".into()));
        }
        let body = create_pet::RequestBody {
            name,
            breed: petcare_domain::non_empty(input.breed),
            weight_kg: input.weight_kg.filter(|w| *w > 0.0),
            birth_date: input.birth_date,
            owner_id: input.owner_id,
        };
        self.base.post(body, "api/pets".into()).await
    }

    pub async fn get(&self, pet_id: ID) -> APIResponse<get_pet::APIResponse> {
        self.base
            .get(format!("api/pets/{}", pet_id))
            .await
            .map_err(|e| e.not_found_as(PET_NOT_FOUND))
    }

    pub async fn update(
        &self,
        pet_id: ID,
        changes: PetChanges,
    ) -> APIResponse<update_pet::APIResponse> {
        let body = update_pet::RequestBody::from(changes);
        let res = self
            .base
            .put(body, format!("api/pets/{}", pet_id))
            .await
            .map_err(|e| e.not_found_as(PET_NOT_FOUND))?;
        self.notifier.publish(pet_id);
        Ok(res)
    }

    pub async fn upload_photo(
        &self,
        input: UploadPhotoInput,
    ) -> APIResponse<upload_pet_photo::APIResponse> {
        input.photo.validate()?;
        let form = Form::new().part(upload_pet_photo::FILE_FIELD, input.photo.into_part()?);
        let query = upload_pet_photo::QueryParams {
            telegram_file_id: input.telegram_file_id,
        };
        let res = self
            .base
            .post_multipart(form, format!("api/pets/{}/upload", input.pet_id), &query)
            .await
            .map_err(|e| {
                e.not_found_as(PET_NOT_FOUND).with_fallback(
                    StatusCode::BAD_REQUEST,
                    &format!("Photo limit exceeded (max {})", MAX_PHOTOS),
                )
            })?;
        self.notifier.publish(input.pet_id);
        Ok(res)
    }

    /// Adds and removes photos of a pet in one request. `existing` is the
    /// number of photos the pet has now, used to check the photo limit
    /// before uploading anything.
    pub async fn update_photos(
        &self,
        input: UpdatePhotosInput,
        existing: usize,
    ) -> APIResponse<update_pet_photos::APIResponse> {
        check_photo_capacity(
            existing,
            input.new_files.len(),
            input.delete_photo_ids.len(),
        )
        .map_err(|e| APIError::InvalidInput(e.to_string()))?;

        let mut form = Form::new();
        for photo in input.new_files {
            photo.validate()?;
            form = form.part(update_pet_photos::NEW_FILES_FIELD, photo.into_part()?);
        }
        for photo_id in &input.delete_photo_ids {
            form = form.text(update_pet_photos::DELETE_PHOTO_IDS_FIELD, photo_id.to_string());
        }

        let res = self
            .base
            .put_multipart(form, format!("api/pets/{}/photos", input.pet_id))
            .await
            .map_err(|e| {
                e.not_found_as(PET_NOT_FOUND)
                    .with_fallback(StatusCode::BAD_REQUEST, "Unable to update photos")
            })?;
        self.notifier.publish(input.pet_id);
        Ok(res)
    }
}
