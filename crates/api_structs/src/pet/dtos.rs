use petcare_domain::ID;
use serde::{Deserialize, Serialize};

pub use petcare_domain::{Pet as PetDTO, Photo as PhotoDTO};

/// Returned after a single photo upload
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedPhotoDTO {
    pub id: ID,
    pub url: String,
}
