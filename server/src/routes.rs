//! HTTP surface — REST endpoints for generation, publication, and download
//!
//! A well-formed generation request with valid configuration never surfaces
//! a failure: model trouble of any kind is absorbed by the pipeline's
//! fallback. User-visible errors are reserved for malformed inbound
//! requests (400) and the missing-credential case (500).

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use uuid::Uuid;

use appforge_gallery::{render_thumbnail, GalleryEntry, GalleryStore, NewGalleryEntry};
use appforge_pipeline::{
    AppCategory, ClaudeClient, ConfigError, GenerationRequest, Layout, ProjectBundle, Theme,
};

use crate::archive;
use crate::config::ServerConfig;

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub gallery: Arc<dyn GalleryStore>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", post(generate_app))
        .route("/api/publish", post(publish_app))
        .route("/api/apps", get(list_apps))
        .route("/api/apps/:id", delete(remove_app))
        .route("/api/download", post(download_app))
        .route("/api/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// --- Errors ---

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Config(ConfigError),
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Config(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::Internal(err) => {
                error!("internal error: {err:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        let body = Json(ErrorResponse {
            success: false,
            error: message,
        });
        (status, body).into_response()
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

// --- API Types ---

#[derive(Deserialize)]
struct GenerateBody {
    #[serde(default)]
    idea: String,
    #[serde(default)]
    theme: String,
    #[serde(default)]
    layout: String,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    success: bool,
    app: GeneratedAppPayload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedAppPayload {
    id: String,
    title: String,
    description: String,
    app_type: AppCategory,
    files: ProjectBundle,
    timestamp: String,
    generation_time: u64,
    fallback: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishBody {
    #[serde(default)]
    title: String,
    app_data: PublishAppData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishAppData {
    #[serde(default)]
    description: String,
    #[serde(default)]
    theme: String,
    #[serde(default)]
    layout: String,
    #[serde(default)]
    files: ProjectBundle,
    #[serde(default)]
    featured: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PublishResponse {
    success: bool,
    app_id: String,
    url: String,
}

#[derive(Serialize)]
struct ListResponse {
    success: bool,
    apps: Vec<GalleryEntry>,
}

#[derive(Serialize)]
struct RemoveResponse {
    success: bool,
    removed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DownloadBody {
    app_data: DownloadAppData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DownloadAppData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    files: ProjectBundle,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

// --- Handlers ---

async fn generate_app(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GenerateResponse>, ApiError> {
    for (field, value) in [
        ("idea", &body.idea),
        ("theme", &body.theme),
        ("layout", &body.layout),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::BadRequest(format!("\"{field}\" is required")));
        }
    }

    // Missing credential is the one failure the fallback cannot cover.
    let credential = state.config.credential().map_err(ApiError::Config)?;

    let request = GenerationRequest::new(
        body.idea.trim(),
        Theme::parse(&body.theme),
        Layout::parse(&body.layout),
    );
    let client = ClaudeClient::new(credential, state.config.generator_config());

    let outcome = appforge_pipeline::generate(&client, &request).await;
    info!(
        "generated app: fallback={} in {}ms",
        outcome.fallback, outcome.generation_ms
    );

    Ok(Json(GenerateResponse {
        success: true,
        app: GeneratedAppPayload {
            id: Uuid::new_v4().to_string(),
            title: outcome.app.title,
            description: outcome.app.description,
            app_type: outcome.app.app_type,
            files: outcome.bundle,
            timestamp: Utc::now().to_rfc3339(),
            generation_time: outcome.generation_ms,
            fallback: outcome.fallback,
        },
    }))
}

async fn publish_app(
    State(state): State<AppState>,
    Json(body): Json<PublishBody>,
) -> Result<Json<PublishResponse>, ApiError> {
    if body.title.trim().is_empty() {
        return Err(ApiError::BadRequest("\"title\" is required".to_string()));
    }
    if body.app_data.files.is_empty() {
        return Err(ApiError::BadRequest(
            "\"appData.files\" must not be empty".to_string(),
        ));
    }

    let thumbnail = render_thumbnail(&body.app_data.theme, &body.title);
    let entry = state.gallery.append(NewGalleryEntry {
        title: body.title,
        theme: body.app_data.theme,
        layout: body.app_data.layout,
        description: body.app_data.description,
        thumbnail,
        files: body.app_data.files,
        featured: body.app_data.featured,
    })?;

    info!("published app {} ({})", entry.title, entry.id);
    let url = format!("/gallery/{}", entry.id);
    Ok(Json(PublishResponse {
        success: true,
        app_id: entry.id,
        url,
    }))
}

async fn list_apps(State(state): State<AppState>) -> Result<Json<ListResponse>, ApiError> {
    let apps = state.gallery.list(state.config.gallery_limit)?;
    Ok(Json(ListResponse {
        success: true,
        apps,
    }))
}

async fn remove_app(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RemoveResponse>, ApiError> {
    let removed = state.gallery.remove(&id)?;
    Ok(Json(RemoveResponse {
        success: true,
        removed,
    }))
}

async fn download_app(
    Json(body): Json<DownloadBody>,
) -> Result<impl IntoResponse, ApiError> {
    if body.app_data.files.is_empty() {
        return Err(ApiError::BadRequest(
            "\"appData.files\" must not be empty".to_string(),
        ));
    }

    let bytes = archive::bundle_to_zip(&body.app_data.files)?;
    let filename = archive::download_filename(&body.app_data.title);

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use appforge_gallery::SqliteGallery;

    fn state() -> AppState {
        AppState {
            config: Arc::new(ServerConfig::default()),
            gallery: Arc::new(SqliteGallery::open_in_memory().unwrap()),
        }
    }

    fn sample_files() -> ProjectBundle {
        let mut files = ProjectBundle::default();
        files.insert("package.json", "{}");
        files.insert("src/App.jsx", "export default function App() {}");
        files.insert("README.md", "# App");
        files
    }

    #[tokio::test]
    async fn test_generate_missing_idea_is_bad_request() {
        let body = GenerateBody {
            idea: "  ".to_string(),
            theme: "minimal".to_string(),
            layout: "dual".to_string(),
        };
        let err = generate_app(State(state()), Json(body)).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_generate_without_credential_is_config_error() {
        // Default config has no credential loaded.
        let body = GenerateBody {
            idea: "a todo app".to_string(),
            theme: "minimal".to_string(),
            layout: "dual".to_string(),
        };
        let err = generate_app(State(state()), Json(body)).await.unwrap_err();
        assert!(matches!(err, ApiError::Config(ConfigError::MissingCredential)));
    }

    #[tokio::test]
    async fn test_publish_then_list_newest_first() {
        let state = state();

        for title in ["A", "B"] {
            let body = PublishBody {
                title: title.to_string(),
                app_data: PublishAppData {
                    description: "test".to_string(),
                    theme: "minimal".to_string(),
                    layout: "single".to_string(),
                    files: sample_files(),
                    featured: false,
                },
            };
            publish_app(State(state.clone()), Json(body)).await.unwrap();
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        let listed = list_apps(State(state)).await.unwrap();
        let titles: Vec<&str> = listed.0.apps.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_publish_empty_files_is_bad_request() {
        let body = PublishBody {
            title: "Empty".to_string(),
            app_data: PublishAppData {
                description: String::new(),
                theme: "minimal".to_string(),
                layout: "single".to_string(),
                files: ProjectBundle::default(),
                featured: false,
            },
        };
        let err = publish_app(State(state()), Json(body)).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_publish_response_has_gallery_url() {
        let body = PublishBody {
            title: "My App".to_string(),
            app_data: PublishAppData {
                description: String::new(),
                theme: "techy".to_string(),
                layout: "dual".to_string(),
                files: sample_files(),
                featured: true,
            },
        };
        let response = publish_app(State(state()), Json(body)).await.unwrap();
        assert!(response.0.success);
        assert_eq!(response.0.url, format!("/gallery/{}", response.0.app_id));
    }

    #[tokio::test]
    async fn test_remove_missing_id_reports_not_removed() {
        let response = remove_app(State(state()), Path("nope".to_string()))
            .await
            .unwrap();
        assert!(response.0.success);
        assert!(!response.0.removed);
    }

    #[tokio::test]
    async fn test_download_empty_bundle_is_bad_request() {
        let body = DownloadBody {
            app_data: DownloadAppData {
                title: "Empty".to_string(),
                files: ProjectBundle::default(),
            },
        };
        assert!(download_app(Json(body)).await.is_err());
    }

    #[tokio::test]
    async fn test_download_returns_zip_attachment() {
        let body = DownloadBody {
            app_data: DownloadAppData {
                title: "Grocery Todo!".to_string(),
                files: sample_files(),
            },
        };
        let response = download_app(Json(body)).await.unwrap().into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(disposition.contains("grocery-todo.zip"));
    }
}
