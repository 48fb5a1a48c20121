use crate::dtos::{PetDTO, UploadedPhotoDTO};
use chrono::NaiveDate;
use petcare_domain::{PetChanges, ID};
use serde::{Deserialize, Serialize};

pub mod create_pet {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub breed: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub weight_kg: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub birth_date: Option<NaiveDate>,
        pub owner_id: ID,
    }

    /// Id of the created `Pet`
    pub type APIResponse = ID;
}

pub mod get_pet {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub pet_id: ID,
    }

    pub type APIResponse = PetDTO;
}

pub mod update_pet {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub pet_id: ID,
    }

    /// Partial update, absent fields are left unchanged
    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub breed: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub weight_kg: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub birth_date: Option<NaiveDate>,
    }

    impl From<PetChanges> for RequestBody {
        fn from(changes: PetChanges) -> Self {
            Self {
                name: changes.name,
                breed: changes.breed,
                weight_kg: changes.weight_kg,
                birth_date: changes.birth_date,
            }
        }
    }

    /// The api does not document the shape of this result
    pub type APIResponse = serde_json::Value;
}

pub mod upload_pet_photo {
    use super::*;

    /// Multipart field carrying the image
    pub const FILE_FIELD: &str = "file";

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub pet_id: ID,
    }

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub telegram_file_id: Option<String>,
    }

    pub type APIResponse = UploadedPhotoDTO;
}

pub mod update_pet_photos {
    use super::*;

    /// Multipart field repeated once per image to add
    pub const NEW_FILES_FIELD: &str = "newFiles";
    /// Multipart field repeated once per photo id to delete
    pub const DELETE_PHOTO_IDS_FIELD: &str = "deletePhotoIds";

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub pet_id: ID,
    }

    pub type APIResponse = serde_json::Value;
}
