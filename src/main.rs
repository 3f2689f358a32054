mod config;
mod error;
mod formatter;
mod handlers;
mod models;
mod server;
mod services;

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;

use config::Config;
use handlers::UploadHandler;
use server::create_router;
use services::{GeminiService, VisionService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init();

    log::info!("🚀 Starting Recipe Lens...");

    let config = Config::from_env()?;

    tokio::fs::create_dir_all(&config.upload_folder)
        .await
        .with_context(|| format!("creating upload folder {}", config.upload_folder.display()))?;
    log::info!("📁 Upload folder: {}", config.upload_folder.display());

    let gemini = GeminiService::new(config.gemini.clone());
    log::info!("✅ Gemini service initialized with model: {}", gemini.model());
    let vision: Arc<dyn VisionService> = Arc::new(gemini);

    let upload_handler = Arc::new(UploadHandler::new(vision, config.upload_folder.clone()));
    let app = create_router(upload_handler, config.max_upload_bytes);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    log::info!("🌐 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            log::info!("🛑 Shutting down...");
        })
        .await?;

    Ok(())
}
