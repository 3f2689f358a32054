use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::error::ApiError;
use crate::handlers::UploadHandler;
use crate::models::{FoodUpload, UploadResponse, DEFAULT_NUM_PEOPLE};

pub struct AppState {
    pub upload_handler: Arc<UploadHandler>,
}

pub fn create_router(upload_handler: Arc<UploadHandler>, max_upload_bytes: usize) -> Router {
    let state = Arc::new(AppState { upload_handler });

    Router::new()
        .route("/", get(index_page))
        .route("/upload", post(upload_file))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .with_state(state)
}

async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let upload = read_upload(multipart.map_err(|_| ApiError::NoFile)?).await?;
    log::info!("🔔 Upload received: {} (num_people={})", upload.filename, upload.num_people);

    let response = state.upload_handler.analyze(upload).await?;
    log::info!("✅ Upload analyzed: {}", response.file_uri);

    Ok(Json(response))
}

async fn read_upload(mut multipart: Multipart) -> Result<FoodUpload, ApiError> {
    let mut file = None;
    let mut num_people = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") if file.is_none() => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                file = Some((filename, content_type, bytes.to_vec()));
            }
            Some("num_people") => num_people = Some(field.text().await?),
            _ => {}
        }
    }

    let (filename, content_type, bytes) = file.ok_or(ApiError::NoFile)?;
    if filename.is_empty() {
        return Err(ApiError::EmptyFilename);
    }

    Ok(FoodUpload {
        filename,
        content_type,
        bytes,
        num_people: parse_num_people(num_people.as_deref())?,
    })
}

fn parse_num_people(value: Option<&str>) -> Result<u32, ApiError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_NUM_PEOPLE);
    };

    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ApiError::BadRequest(
            "num_people must be a positive integer".to_string(),
        )),
    }
}

async fn index_page() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn health_check() -> &'static str {
    "OK"
}
