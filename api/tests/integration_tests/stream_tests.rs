//! Integration tests for server-sent event log replay.
//!
//! Tests cover:
//! - Event order and payloads for depth and time logs
//! - Rejection of non-log files and bad parameters

use axum::http::StatusCode;

use super::common::{get, get_text, parse_sse, test_app};

#[tokio::test]
async fn test_stream_depth_log() {
    let app = test_app().await;
    let id = app.file_id("depth_log.xml");

    let (status, content_type, body) =
        get_text(app.app(), &format!("/files/{id}/stream?delay=0")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.is_some_and(|ct| ct.starts_with("text/event-stream")));

    let events = parse_sse(&body);
    let names: Vec<&str> = events.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec!["metadata", "schema", "data", "data", "data", "data", "data", "data", "end"]
    );

    let (_, metadata) = &events[0];
    assert_eq!(metadata["file_name"], "depth_log.xml");
    assert_eq!(metadata["well_name"], "Alpha-1");
    assert!(metadata["timestamp"].is_string());

    let (_, schema) = &events[1];
    assert_eq!(schema["log_uid"], "log-alpha-depth");
    assert_eq!(schema["curves"].as_array().unwrap().len(), 4);

    let (_, last_row) = &events[7];
    assert_eq!(last_row["index"], 5);
    assert_eq!(last_row["log_uid"], "log-alpha-depth");
    assert_eq!(last_row["values"][0], "1502.5");

    let (_, end) = &events[8];
    assert_eq!(end["type"], "end");
    assert_eq!(end["message"], "Stream complete");
}

#[tokio::test]
async fn test_stream_time_log() {
    let app = test_app().await;
    let id = app.file_id("time_log.xml");

    let (status, _, body) = get_text(app.app(), &format!("/files/{id}/stream?delay=0")).await;
    assert_eq!(status, StatusCode::OK);

    let events = parse_sse(&body);
    let rows: Vec<_> = events.iter().filter(|(name, _)| name == "data").collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].1["values"][0], "2024-03-01T08:00:00Z");
}

#[tokio::test]
async fn test_stream_non_log_file_is_rejected() {
    let app = test_app().await;
    let id = app.file_id("wells.xml");

    let (status, response) = get(app.app(), &format!("/files/{id}/stream")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["detail"], "Only log files can be streamed");
}

#[tokio::test]
async fn test_stream_unknown_file_is_404() {
    let app = test_app().await;

    let (status, _) = get(app.app(), "/files/missing/stream?delay=0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stream_rejects_invalid_delay() {
    let app = test_app().await;
    let id = app.file_id("depth_log.xml");

    let (status, _) = get(app.app(), &format!("/files/{id}/stream?delay=999999")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(app.app(), &format!("/files/{id}/stream?delay=soon")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
