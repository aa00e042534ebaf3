use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::image::ImageFile;

pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Image metadata returned to clients; never carries the bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub id: Uuid,
    pub file_name: String,
    pub download_url: String,
}

/// One uploaded file as read from a multipart body.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), content_type: content_type.map(str::to_string), bytes }
    }

    /// Resolve the stored content type: the declared one, else a guess from
    /// the file extension, else `application/octet-stream`.
    pub fn content_type(&self) -> String {
        self.content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .map(str::to_string)
            .or_else(|| mime_guess::from_path(&self.file_name).first_raw().map(str::to_string))
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
    }

    pub fn into_file(self) -> ImageFile {
        let file_type = self.content_type();
        ImageFile { file_name: self.file_name, file_type, data: self.bytes }
    }
}
