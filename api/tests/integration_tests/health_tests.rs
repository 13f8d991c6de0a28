//! Integration tests for health check and general API functionality.
//!
//! Tests cover:
//! - Health check endpoints
//! - Empty data directory behavior

use axum::http::StatusCode;

use super::common::{empty_app, get, test_app, FIXTURE_COUNT};

#[tokio::test]
async fn test_root_reports_loaded_files() {
    let app = test_app().await;

    let (status, response) = get(app.app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "ok");
    assert_eq!(response["files_loaded"], FIXTURE_COUNT);
    assert_eq!(
        response["data_dir"],
        app.dir.path().display().to_string().as_str()
    );
}

#[tokio::test]
async fn test_health_matches_root() {
    let app = test_app().await;

    let (status, root) = get(app.app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    let (status, health) = get(app.app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(root, health);
}

#[tokio::test]
async fn test_empty_data_dir_returns_empty_results() {
    let app = empty_app().await;

    let (status, response) = get(app.app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["files_loaded"], 0);

    let (status, response) = get(app.app(), "/files").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"], 0);
    assert!(response["files"].as_array().unwrap().is_empty());

    let (status, response) = get(app.app(), "/witsml/wells").await;
    assert_eq!(status, StatusCode::OK);
    assert!(response.as_array().unwrap().is_empty());
}
