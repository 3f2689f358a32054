use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::formatter::format_html;
use crate::models::{FoodUpload, UploadResponse};
use crate::services::VisionService;

const SUCCESS_MESSAGE: &str = "File uploaded and analyzed successfully";
const FALLBACK_MIME: &str = "image/jpeg";

static UPLOAD_SEQ: AtomicU64 = AtomicU64::new(0);

pub struct UploadHandler {
    vision: Arc<dyn VisionService>,
    upload_folder: PathBuf,
}

impl UploadHandler {
    pub fn new(vision: Arc<dyn VisionService>, upload_folder: PathBuf) -> Self {
        Self {
            vision,
            upload_folder,
        }
    }

    /// Store the image, ask the model for a recipe and render the answer as HTML.
    pub async fn analyze(&self, upload: FoodUpload) -> Result<UploadResponse> {
        let mime_type = upload
            .content_type
            .as_deref()
            .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream")
            .map(str::to_string)
            .unwrap_or_else(|| guess_mime(&upload.filename).to_string());

        let path = self.store(&upload.filename, &upload.bytes).await?;
        log::info!(
            "📸 Stored upload {} ({} bytes, {}) for {} people",
            path.display(),
            upload.bytes.len(),
            mime_type,
            upload.num_people
        );

        let file = self.vision.upload_file(&path, &mime_type).await?;
        let answer = self
            .vision
            .generate(&file, &recipe_prompt(upload.num_people))
            .await?;

        Ok(UploadResponse {
            message: SUCCESS_MESSAGE.to_string(),
            file_uri: file.uri,
            bot_response_html: format_html(&answer),
        })
    }

    async fn store(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.upload_folder)
            .await
            .with_context(|| format!("creating {}", self.upload_folder.display()))?;

        let path = self.upload_folder.join(stored_name(filename));
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("writing {}", path.display()))?;

        Ok(path)
    }
}

pub fn recipe_prompt(num_people: u32) -> String {
    format!(
        "Identify this food item and provide a detailed recipe for {} people, \
         including ingredients, preparation steps, cost estimation, calorie count, \
         and an overall summary.",
        num_people
    )
}

/// Per-request file name, so concurrent uploads of `photo.jpg` never share a path.
fn stored_name(filename: &str) -> String {
    format!(
        "img_{}_{}_{}",
        chrono::Utc::now().timestamp_millis(),
        UPLOAD_SEQ.fetch_add(1, Ordering::Relaxed),
        secure_filename(filename)
    )
}

/// Reduce a client supplied file name to a safe, flat ASCII name.
pub fn secure_filename(name: &str) -> String {
    let flattened: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned: String = joined
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    let cleaned = cleaned.trim_matches(|c: char| c == '.' || c == '_');

    if cleaned.is_empty() {
        format!("upload_{}", chrono::Utc::now().timestamp())
    } else {
        cleaned.to_string()
    }
}

pub fn guess_mime(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => FALLBACK_MIME,
    }
}
