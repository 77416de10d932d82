//! Web API module for editing the rotation configuration.
//!
//! This module provides a small REST API reading and overwriting the three
//! configuration documents. It shares no memory with the rotation loop:
//! every write lands on disk and is picked up by the loop's change
//! detection.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/config/{kind}` - Raw `settings`, `presets`, or `statuses` document
//! - `POST /api/config/{kind}` - Validate and overwrite a document
//!
//! Any other path falls back to the static frontend directory, if one is
//! configured.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{ConfigKind, ConfigStore};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Store for the configuration documents
    store: Arc<ConfigStore>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(store: ConfigStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Returns the configuration store.
    #[must_use]
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Successful update response.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    /// Always "ok".
    pub status: String,
    /// Human-readable confirmation.
    pub message: String,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn parse_kind(kind: &str) -> ApiResult<ConfigKind> {
    ConfigKind::from_name(kind).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("Unknown configuration type")),
        )
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/config/{kind} - Return a document as stored on disk.
async fn get_config(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;

    let data = state.store.read_raw(kind).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details(
                "Failed to read configuration file",
                e.to_string(),
            )),
        )
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], data))
}

/// POST /api/config/{kind} - Validate and overwrite a document.
async fn update_config(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    body: Bytes,
) -> ApiResult<Json<UpdateResponse>> {
    let kind = parse_kind(&kind)?;

    // Sanity check: body must match the document's array schema
    kind.validate(&body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details(
                "Invalid JSON structure",
                format!("{e:#}"),
            )),
        )
    })?;

    state.store.save_raw(kind, &body).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details(
                "Failed to write configuration file",
                format!("{e:#}"),
            )),
        )
    })?;

    info!("{kind} configuration updated via API");

    Ok(Json(UpdateResponse {
        status: "ok".to_string(),
        message: format!("{kind} configuration updated"),
    }))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
///
/// When `static_dir` is set, unmatched paths are served from it.
pub fn create_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    // CORS configuration - allow all origins; the server is a local tool
    // editing files next to the rotation loop.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/health", get(health_check))
        .route("/api/config/{kind}", get(get_config).post(update_config));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Arguments
///
/// * `store` - Store for the configuration documents
/// * `static_dir` - Optional frontend directory
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(
    store: ConfigStore,
    static_dir: Option<PathBuf>,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let state = AppState::new(store);
    let app = create_router(state, static_dir);

    info!("Starting configuration web server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
