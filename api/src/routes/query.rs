//! Advanced file query and catalog reload endpoints.

use crate::error::ApiError;
use crate::routes::files::FileList;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::DataType;
use shared::storage::FileQuery;
use std::collections::HashMap;
use validator::{Validate, ValidationError};

/// Inclusive creation-time range.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

fn validate_date_range(range: &DateRange) -> Result<(), ValidationError> {
    match (range.start, range.end) {
        (Some(start), Some(end)) if start > end => {
            let mut error = ValidationError::new("date_range");
            error.message = Some("start must not be after end".into());
            Err(error)
        }
        _ => Ok(()),
    }
}

/// Request body for `POST /query`.
///
/// Every present filter must match; an empty list is no filter.
/// `metadata_filters` keys name `FileInfo.metadata` fields (`path`,
/// `original_name`) and an unknown key matches nothing.
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct FileQueryRequest {
    #[serde(default)]
    pub well_names: Option<Vec<String>>,
    #[serde(default)]
    pub file_types: Option<Vec<DataType>>,
    #[serde(default)]
    #[validate(custom(function = "validate_date_range"))]
    pub date_range: Option<DateRange>,
    #[serde(default)]
    pub metadata_filters: Option<HashMap<String, String>>,
}

impl From<FileQueryRequest> for FileQuery {
    fn from(request: FileQueryRequest) -> Self {
        let mut query = FileQuery::new();
        if let Some(well_names) = request.well_names.filter(|v| !v.is_empty()) {
            query = query.with_well_names(well_names);
        }
        if let Some(file_types) = request.file_types.filter(|v| !v.is_empty()) {
            query = query.with_file_types(file_types);
        }
        if let Some(range) = request.date_range {
            query = query.with_created_between(range.start, range.end);
        }
        if let Some(metadata) = request.metadata_filters.filter(|m| !m.is_empty()) {
            query = query.with_metadata(metadata);
        }
        query
    }
}

/// Response for `POST /reload`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub status: String,
    pub files_count: usize,
}

/// Creates the query and reload routes.
pub fn query_routes(state: AppState) -> Router {
    Router::new()
        .route("/query", post(query_files))
        .route("/reload", post(reload_files))
        .with_state(state)
}

async fn query_files(
    State(state): State<AppState>,
    payload: Result<Json<FileQueryRequest>, JsonRejection>,
) -> Result<Json<FileList>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let query = FileQuery::from(request);
    let files = state.file_store().list(&query)?;
    tracing::debug!(matched = files.len(), "File query executed");

    Ok(Json(FileList::from(files)))
}

async fn reload_files(State(state): State<AppState>) -> Result<Json<ReloadResponse>, ApiError> {
    let report = state.reload().await?;
    tracing::info!(
        files = report.files.len(),
        skipped = report.skipped.len(),
        data_dir = %state.data_dir().display(),
        "Fixtures reloaded"
    );

    Ok(Json(ReloadResponse {
        status: "ok".to_string(),
        files_count: report.files.len(),
    }))
}
