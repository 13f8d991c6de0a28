//! Integration tests for WITSML store emulation.
//!
//! Tests cover:
//! - Server status and capabilities
//! - Well / wellbore / log navigation
//! - Log data index ranges

use axum::http::StatusCode;

use super::common::{get, post_empty, test_app, FIXTURE_COUNT};

const ALPHA_LOGS: &str = "/witsml/wells/w-alpha/wellbores/wb-alpha-main/logs";

#[tokio::test]
async fn test_status_and_info() {
    let app = test_app().await;

    let (status, response) = get(app.app(), "/witsml/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "connected");
    assert!(response["server_url"].as_str().unwrap().starts_with("file://"));

    let (status, response) = get(app.app(), "/witsml/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["version"], "1.4.1.1");
    assert_eq!(response["status"], "connected");
    assert!(response["url"].as_str().unwrap().starts_with("file://"));
    let objects = response["capabilities"]["supported_objects"]
        .as_array()
        .unwrap();
    let log = objects.iter().find(|o| o["name"] == "log").unwrap();
    assert_eq!(log["files"], 2);
    assert!(objects.iter().all(|o| o["name"] != "unknown"));
}

#[tokio::test]
async fn test_clear_cache_returns_no_content() {
    let app = test_app().await;

    let (status, response) = post_empty(app.app(), "/witsml/clear-cache").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(response.is_null());

    let (status, response) = get(app.app(), "/files").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"], FIXTURE_COUNT);
}

#[tokio::test]
async fn test_wells_and_wellbores() {
    let app = test_app().await;

    let (status, response) = get(app.app(), "/witsml/wells").await;
    assert_eq!(status, StatusCode::OK);
    let wells = response.as_array().unwrap();
    assert_eq!(wells.len(), 2);
    assert_eq!(wells[0]["uid"], "w-alpha");
    assert_eq!(wells[0]["metadata"]["field"], "North Ridge");

    let (status, response) = get(app.app(), "/witsml/wells/w-alpha/wellbores").await;
    assert_eq!(status, StatusCode::OK);
    let uids: Vec<&str> = response
        .as_array()
        .unwrap()
        .iter()
        .map(|wb| wb["uid"].as_str().unwrap())
        .collect();
    assert_eq!(uids, vec!["wb-alpha-main", "wb-alpha-st1"]);

    let (status, response) = get(app.app(), "/witsml/wells/w-unknown/wellbores").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(response["detail"].is_string());
}

#[tokio::test]
async fn test_log_headers_have_no_data() {
    let app = test_app().await;

    let (status, response) = get(app.app(), ALPHA_LOGS).await;
    assert_eq!(status, StatusCode::OK);
    let logs = response.as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["uid"], "log-alpha-depth");
    assert!(logs[0]["data"].is_null());
    assert_eq!(logs[0]["curves"].as_array().unwrap().len(), 4);

    let (status, response) =
        get(app.app(), "/witsml/wells/w-alpha/wellbores/wb-alpha-st1/logs").await;
    assert_eq!(status, StatusCode::OK);
    assert!(response.as_array().unwrap().is_empty());

    let (status, _) = get(app.app(), "/witsml/wells/w-alpha/wellbores/wb-nope/logs").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_depth_log_data_range() {
    let app = test_app().await;

    let (status, response) = get(
        app.app(),
        &format!("{ALPHA_LOGS}/log-alpha-depth/data?start_index=1500.5&end_index=1501.5"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let values = response["data"]["values"].as_array().unwrap();
    assert_eq!(values.len(), 3);
    assert_eq!(values[0][0], "1500.5");
    assert_eq!(values[2][0], "1501.5");

    let (_, response) = get(app.app(), &format!("{ALPHA_LOGS}/log-alpha-depth/data")).await;
    assert_eq!(response["data"]["values"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_time_log_data_range() {
    let app = test_app().await;

    let (status, response) = get(
        app.app(),
        "/witsml/wells/w-bravo/wellbores/wb-bravo-main/logs/log-bravo-time/data\
         ?start_index=2024-03-01T08:00:30Z&end_index=2024-03-01T08:01:00Z",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let values = response["data"]["values"].as_array().unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values[1][1], "184.7");
}

#[tokio::test]
async fn test_unknown_log_is_404() {
    let app = test_app().await;

    let (status, response) = get(app.app(), &format!("{ALPHA_LOGS}/log-missing/data")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["detail"], "Log log-missing not found");
}
