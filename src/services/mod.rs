pub mod ai_service;
pub mod gemini; // Google Gemini vision model

pub use ai_service::{UploadedFile, VisionService};
pub use gemini::GeminiService;
