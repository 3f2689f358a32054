use serde::{Deserialize, Serialize};

pub const DEFAULT_NUM_PEOPLE: u32 = 4;

/// An image received from the web client, before it is stored.
#[derive(Debug, Clone)]
pub struct FoodUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    pub num_people: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub file_uri: String,
    pub bot_response_html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
