use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// JSON envelope shared by every catalog endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self { message: message.into(), data: Some(data) }
    }

    pub fn message_only(message: impl Into<String>) -> Self {
        Self { message: message.into(), data: None }
    }
}
