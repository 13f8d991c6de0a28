//! WITSML store emulation endpoints.
//!
//! Serves the well → wellbore → log hierarchy found in the loaded fixtures,
//! shaped like the responses of a live WITSML server connection.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shared::hierarchy::{Hierarchy, IndexRange};
use shared::models::{DataType, LogInfo, WellInfo, WellboreInfo};

/// WITSML schema version reported by the emulated server.
pub const WITSML_VERSION: &str = "1.4.1.1";

/// Connection status response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServerStatus {
    pub status: String,
    pub server_url: String,
}

/// An object type the emulated server can return.
#[derive(Debug, Serialize, Deserialize)]
pub struct SupportedObject {
    pub name: String,
    pub files: usize,
}

/// Object types served, with the number of fixtures holding each.
#[derive(Debug, Serialize, Deserialize)]
pub struct Capabilities {
    pub supported_objects: Vec<SupportedObject>,
}

/// Server information response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServerInfo {
    pub version: String,
    pub capabilities: Capabilities,
    pub url: String,
    pub status: String,
}

/// Creates the WITSML emulation routes.
pub fn witsml_routes(state: AppState) -> Router {
    Router::new()
        .route("/witsml/status", get(server_status))
        .route("/witsml/info", get(server_info))
        .route("/witsml/clear-cache", post(clear_cache))
        .route("/witsml/wells", get(list_wells))
        .route("/witsml/wells/{well_uid}/wellbores", get(list_wellbores))
        .route(
            "/witsml/wells/{well_uid}/wellbores/{wellbore_uid}/logs",
            get(list_logs),
        )
        .route(
            "/witsml/wells/{well_uid}/wellbores/{wellbore_uid}/logs/{log_uid}/data",
            get(log_data),
        )
        .with_state(state)
}

fn server_url(state: &AppState) -> String {
    format!("file://{}", state.data_dir().display())
}

async fn server_status(State(state): State<AppState>) -> Json<ServerStatus> {
    Json(ServerStatus {
        status: "connected".to_string(),
        server_url: server_url(&state),
    })
}

async fn server_info(State(state): State<AppState>) -> Result<Json<ServerInfo>, ApiError> {
    let files = state.all_files()?;
    let supported_objects = DataType::ALL
        .into_iter()
        .filter(|t| *t != DataType::Unknown)
        .map(|t| SupportedObject {
            name: t.as_str().to_string(),
            files: files.iter().filter(|f| f.info.file_type == t).count(),
        })
        .collect();

    Ok(Json(ServerInfo {
        version: WITSML_VERSION.to_string(),
        capabilities: Capabilities { supported_objects },
        url: server_url(&state),
        status: "connected".to_string(),
    }))
}

// Fixtures are served straight from the catalog, so there is nothing to drop.
async fn clear_cache() -> StatusCode {
    tracing::info!("WITSML cache clear requested");
    StatusCode::NO_CONTENT
}

async fn list_wells(State(state): State<AppState>) -> Result<Json<Vec<WellInfo>>, ApiError> {
    let files = state.all_files()?;
    Ok(Json(Hierarchy::new(&files).wells()))
}

async fn list_wellbores(
    State(state): State<AppState>,
    Path(well_uid): Path<String>,
) -> Result<Json<Vec<WellboreInfo>>, ApiError> {
    let files = state.all_files()?;
    let hierarchy = Hierarchy::new(&files);
    if !hierarchy.has_well(&well_uid) {
        return Err(ApiError::NotFound(format!("Well {well_uid} not found")));
    }
    Ok(Json(hierarchy.wellbores(&well_uid)))
}

async fn list_logs(
    State(state): State<AppState>,
    Path((well_uid, wellbore_uid)): Path<(String, String)>,
) -> Result<Json<Vec<LogInfo>>, ApiError> {
    let files = state.all_files()?;
    let hierarchy = Hierarchy::new(&files);
    if !hierarchy.has_wellbore(&well_uid, &wellbore_uid) {
        return Err(ApiError::NotFound(format!(
            "Wellbore {wellbore_uid} of well {well_uid} not found"
        )));
    }
    Ok(Json(hierarchy.logs(&well_uid, &wellbore_uid)))
}

async fn log_data(
    State(state): State<AppState>,
    Path((well_uid, wellbore_uid, log_uid)): Path<(String, String, String)>,
    range: Result<Query<IndexRange>, QueryRejection>,
) -> Result<Json<LogInfo>, ApiError> {
    let Query(range) = range?;
    let files = state.all_files()?;

    Hierarchy::new(&files)
        .log_data(&well_uid, &wellbore_uid, &log_uid, &range)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Log {log_uid} not found")))
}
