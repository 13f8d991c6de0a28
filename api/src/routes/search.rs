//! Lexical search endpoint.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shared::search::{search, SearchQuery, SearchResult};
use std::time::Instant;
use validator::Validate;

/// Response for `POST /search`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub total: usize,
    pub query_time_ms: u64,
}

/// Creates the search routes.
pub fn search_routes(state: AppState) -> Router {
    Router::new()
        .route("/search", post(search_files))
        .with_state(state)
}

async fn search_files(
    State(state): State<AppState>,
    payload: Result<Json<SearchQuery>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(query) = payload?;
    if query.query.trim().is_empty() {
        return Err(ApiError::BadRequest("Query cannot be empty".to_string()));
    }
    query.validate()?;

    let started = Instant::now();
    let files = state.all_files()?;
    let results = search(&files, &query);
    let query_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    tracing::debug!(
        query = %query.query,
        hits = results.len(),
        query_time_ms,
        "Search executed"
    );

    Ok(Json(SearchResponse {
        total: results.len(),
        results,
        query_time_ms,
    }))
}
