//! Health check endpoint.
//!
//! Reports that the server is up and how many fixtures it is serving.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Service status (always "ok" if reachable).
    pub status: String,
    /// Directory the fixtures were loaded from.
    pub data_dir: String,
    /// Number of loaded fixtures.
    pub files_loaded: usize,
}

/// Creates the health check routes.
pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> Result<Json<HealthCheck>, ApiError> {
    Ok(Json(HealthCheck {
        status: "ok".to_string(),
        data_dir: state.data_dir().display().to_string(),
        files_loaded: state.file_store().count()?,
    }))
}
