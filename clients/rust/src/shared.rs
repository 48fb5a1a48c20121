use crate::APIError;
use petcare_domain::{content_type_for_file_name, validate_photo};
use reqwest::multipart::Part;

/// An image about to be uploaded
#[derive(Debug, Clone)]
pub struct PhotoFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoFile {
    /// Creates a `PhotoFile` guessing the content type from the file name
    pub fn new<T: Into<String>>(file_name: T, bytes: Vec<u8>) -> Result<Self, APIError> {
        let file_name = file_name.into();
        let content_type = content_type_for_file_name(&file_name).ok_or_else(|| {
            APIError::InvalidInput(format!("{} is not a supported image file", file_name))
        })?;
        Ok(Self {
            file_name,
            content_type: content_type.to_string(),
            bytes,
        })
    }

    pub(crate) fn validate(&self) -> Result<(), APIError> {
        validate_photo(self.bytes.len(), &self.content_type)
            .map_err(|e| APIError::InvalidInput(e.to_string()))
    }

    pub(crate) fn into_part(self) -> Result<Part, APIError> {
        let content_type = self.content_type;
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&content_type)
            .map_err(|_| APIError::InvalidInput(format!("Invalid content type: {}", content_type)))
    }
}
