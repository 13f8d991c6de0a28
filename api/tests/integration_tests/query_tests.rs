//! Integration tests for the advanced file query endpoint.
//!
//! Tests cover:
//! - Multi-value well name and file type filters
//! - Creation date ranges
//! - Metadata field filters
//! - Request validation

use axum::http::StatusCode;
use serde_json::json;

use super::common::{post_json, test_app, FIXTURE_COUNT};

#[tokio::test]
async fn test_query_by_well_names() {
    let app = test_app().await;

    let (status, response) = post_json(app.app(), "/query", json!({"well_names": ["Alpha-1"]})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"], 5);

    let (_, response) = post_json(
        app.app(),
        "/query",
        json!({"well_names": ["Alpha-1", "Bravo-2"]}),
    )
    .await;
    assert_eq!(response["count"], FIXTURE_COUNT);
}

#[tokio::test]
async fn test_query_by_file_types() {
    let app = test_app().await;

    let (status, response) = post_json(
        app.app(),
        "/query",
        json!({"file_types": ["log", "mudLog"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"], 3);

    let (_, response) = post_json(
        app.app(),
        "/query",
        json!({"well_names": ["Alpha-1"], "file_types": ["log"]}),
    )
    .await;
    assert_eq!(response["count"], 1);
    assert_eq!(response["files"][0]["name"], "depth_log.xml");
}

#[tokio::test]
async fn test_query_empty_body_matches_everything() {
    let app = test_app().await;

    let (status, response) = post_json(app.app(), "/query", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"], FIXTURE_COUNT);

    let (status, response) = post_json(
        app.app(),
        "/query",
        json!({"well_names": [], "file_types": []}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"], FIXTURE_COUNT);
}

#[tokio::test]
async fn test_query_by_metadata_filters() {
    let app = test_app().await;

    let (status, response) = post_json(
        app.app(),
        "/query",
        json!({"metadata_filters": {"original_name": "wells.xml"}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"], 1);
    assert_eq!(response["files"][0]["name"], "wells.xml");

    let (_, response) = post_json(
        app.app(),
        "/query",
        json!({
            "well_names": ["Bravo-2"],
            "metadata_filters": {"original_name": "wells.xml"}
        }),
    )
    .await;
    assert_eq!(response["count"], 0);

    let (status, response) = post_json(
        app.app(),
        "/query",
        json!({"metadata_filters": {"operator": "Acme"}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"], 0);
}

#[tokio::test]
async fn test_query_by_date_range() {
    let app = test_app().await;

    let (status, response) = post_json(
        app.app(),
        "/query",
        json!({"date_range": {"start": "2000-01-01T00:00:00Z"}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"], FIXTURE_COUNT);

    let (_, response) = post_json(
        app.app(),
        "/query",
        json!({"date_range": {"start": "2999-01-01T00:00:00Z"}}),
    )
    .await;
    assert_eq!(response["count"], 0);
}

#[tokio::test]
async fn test_query_rejects_invalid_requests() {
    let app = test_app().await;

    let (status, response) = post_json(
        app.app(),
        "/query",
        json!({"date_range": {
            "start": "2024-02-01T00:00:00Z",
            "end": "2024-01-01T00:00:00Z"
        }}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["detail"].is_string());

    let (status, response) =
        post_json(app.app(), "/query", json!({"file_types": ["trajectory"]})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["detail"].is_string());
}
