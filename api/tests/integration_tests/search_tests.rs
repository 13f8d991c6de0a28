//! Integration tests for lexical search.
//!
//! Tests cover:
//! - Ranking and result shape
//! - Filters and result limits
//! - Empty queries

use axum::http::StatusCode;
use serde_json::json;

use super::common::{post_json, test_app};

#[tokio::test]
async fn test_search_curve_description() {
    let app = test_app().await;

    let (status, response) = post_json(app.app(), "/search", json!({"query": "Gamma ray"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["total"], 1);
    assert!(response["query_time_ms"].is_u64());

    let hit = &response["results"][0];
    assert_eq!(hit["source"], "depth_log.xml");
    assert_eq!(hit["content_type"], "log");
    assert_eq!(hit["score"], 1.0);
    assert_eq!(hit["id"], app.file_id("depth_log.xml").as_str());
    assert_eq!(hit["metadata"]["well"], "Alpha-1");
}

#[tokio::test]
async fn test_search_ranks_partial_matches_lower() {
    let app = test_app().await;

    let (_, response) = post_json(
        app.app(),
        "/search",
        json!({"query": "sandstone porosity hookload"}),
    )
    .await;
    let results = response["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["source"], "mud_log.xml");

    let (_, response) = post_json(app.app(), "/search", json!({"query": "gas pressure"})).await;
    let results = response["results"].as_array().unwrap();
    let scores: Vec<f64> = results.iter().map(|r| r["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(scores.iter().all(|s| *s > 0.0 && *s <= 1.0));
}

#[tokio::test]
async fn test_search_filters_and_limit() {
    let app = test_app().await;

    let (_, response) = post_json(app.app(), "/search", json!({"query": "gas"})).await;
    assert_eq!(response["total"], 2);

    let (_, response) = post_json(
        app.app(),
        "/search",
        json!({"query": "gas", "filters": {"file_type": "messages"}}),
    )
    .await;
    assert_eq!(response["total"], 1);
    assert_eq!(response["results"][0]["source"], "messages.xml");

    let (_, response) = post_json(
        app.app(),
        "/search",
        json!({"query": "gas", "max_results": 1}),
    )
    .await;
    assert_eq!(response["total"], 1);
}

#[tokio::test]
async fn test_search_empty_query_is_rejected() {
    let app = test_app().await;

    let (status, response) = post_json(app.app(), "/search", json!({"query": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["detail"], "Query cannot be empty");
}
