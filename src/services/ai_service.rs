use anyhow::Result;
use std::path::Path;

/// A file the model provider has accepted and can reference in prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub uri: String,
    pub mime_type: String,
}

/// Trait for vision-capable AI services (Gemini, test doubles)
#[async_trait::async_trait]
pub trait VisionService: Send + Sync {
    async fn upload_file(&self, path: &Path, mime_type: &str) -> Result<UploadedFile>;
    async fn generate(&self, file: &UploadedFile, prompt: &str) -> Result<String>;
}
