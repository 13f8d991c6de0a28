//! File catalog endpoints.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shared::models::{FileContent, FileInfo, StoredFile};
use shared::storage::FileQuery;

/// Query parameters for listing files.
#[derive(Debug, Default, Deserialize)]
pub struct FileListParams {
    pub well_name: Option<String>,
    pub file_type: Option<String>,
}

/// A list of catalog entries.
#[derive(Debug, Serialize, Deserialize)]
pub struct FileList {
    pub files: Vec<FileInfo>,
    pub count: usize,
}

impl From<Vec<StoredFile>> for FileList {
    fn from(files: Vec<StoredFile>) -> Self {
        let files: Vec<FileInfo> = files.into_iter().map(|f| f.info).collect();
        Self {
            count: files.len(),
            files,
        }
    }
}

/// A single file with its processed content.
#[derive(Debug, Serialize, Deserialize)]
pub struct FileResponse {
    pub info: FileInfo,
    pub content: FileContent,
}

/// Creates the file catalog routes.
pub fn files_routes(state: AppState) -> Router {
    Router::new()
        .route("/files", get(list_files))
        .route("/files/{file_id}", get(get_file))
        .with_state(state)
}

async fn list_files(
    State(state): State<AppState>,
    Query(params): Query<FileListParams>,
) -> Result<Json<FileList>, ApiError> {
    let mut query = FileQuery::new();
    if let Some(well_name) = params.well_name {
        query = query.with_well_name(well_name);
    }
    if let Some(file_type) = params.file_type {
        query = query.with_file_type(file_type);
    }

    let files = state.file_store().list(&query)?;
    Ok(Json(FileList::from(files)))
}

/// Looks up a file by id, mapping a miss to a 404.
pub(crate) fn find_file(state: &AppState, file_id: &str) -> Result<StoredFile, ApiError> {
    state
        .file_store()
        .get(file_id)?
        .ok_or_else(|| ApiError::NotFound(format!("File with ID {file_id} not found")))
}

async fn get_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let file = find_file(&state, &file_id)?;
    Ok(Json(FileResponse {
        info: file.info,
        content: file.content,
    }))
}
