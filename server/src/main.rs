//! AppForge server — idea in, runnable single-page app bundle out
//!
//! Serves the generation pipeline over HTTP: a free-text idea plus theme and
//! layout selections becomes a validated app bundle (model-generated, or the
//! deterministic fallback when the model misbehaves), downloadable as a zip
//! and publishable to the shared gallery.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

mod archive;
mod config;
mod routes;

use appforge_gallery::SqliteGallery;
use config::ServerConfig;
use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .compact()
        .init();

    info!("AppForge server starting...");

    let config = ServerConfig::load().context("Failed to load configuration")?;
    if !config.has_credential() {
        warn!("ANTHROPIC_API_KEY not set — generation requests will fail until it is configured");
    }

    let gallery = SqliteGallery::open(&config.gallery_db_path)
        .with_context(|| format!("Failed to open gallery store: {}", config.gallery_db_path))?;

    let bind_addr = config.bind_addr.clone();
    let state = AppState {
        config: Arc::new(config),
        gallery: Arc::new(gallery),
    };

    let app = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    info!("AppForge server listening on http://{bind_addr}");

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}
