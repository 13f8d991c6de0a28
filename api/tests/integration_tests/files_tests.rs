//! Integration tests for the file catalog.
//!
//! Tests cover:
//! - Listing and filtering files
//! - Retrieving processed content
//! - Malformed fixtures and reloading

use axum::http::StatusCode;

use super::common::{get, post_empty, test_app, FIXTURE_COUNT};

#[tokio::test]
async fn test_list_files_in_name_order() {
    let app = test_app().await;

    let (status, response) = get(app.app(), "/files").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"], FIXTURE_COUNT);

    let files = response["files"].as_array().unwrap();
    let names: Vec<&str> = files.iter().map(|f| f["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "depth_log.xml",
            "messages.xml",
            "mud_log.xml",
            "time_log.xml",
            "wellbores.xml",
            "wells.xml"
        ]
    );

    for file in files {
        assert!(file["id"].is_string());
        assert!(file["well_name"].is_string());
        assert!(file["file_type"].is_string());
        assert!(file["size"].as_u64().unwrap() > 0);
    }
}

#[tokio::test]
async fn test_file_types_and_well_names() {
    let app = test_app().await;

    let (_, response) = get(app.app(), "/files").await;
    let pairs: Vec<(&str, &str)> = response["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| {
            (
                f["file_type"].as_str().unwrap(),
                f["well_name"].as_str().unwrap(),
            )
        })
        .collect();

    assert_eq!(
        pairs,
        vec![
            ("log", "Alpha-1"),
            ("messages", "Alpha-1"),
            ("mudLog", "Alpha-1"),
            ("log", "Bravo-2"),
            ("wellbore", "Alpha-1"),
            ("well", "Alpha-1"),
        ]
    );
}

#[tokio::test]
async fn test_filter_files() {
    let app = test_app().await;

    let (status, response) = get(app.app(), "/files?file_type=log").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"], 2);

    let (_, response) = get(app.app(), "/files?well_name=Bravo-2").await;
    assert_eq!(response["count"], 1);
    assert_eq!(response["files"][0]["name"], "time_log.xml");

    let (_, response) = get(app.app(), "/files?well_name=Alpha-1&file_type=log").await;
    assert_eq!(response["count"], 1);
    assert_eq!(response["files"][0]["name"], "depth_log.xml");

    let (_, response) = get(app.app(), "/files?file_type=trajectory").await;
    assert_eq!(response["count"], 0);
}

#[tokio::test]
async fn test_get_log_file_content() {
    let app = test_app().await;
    let id = app.file_id("depth_log.xml");

    let (status, response) = get(app.app(), &format!("/files/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["info"]["id"], id.as_str());
    assert_eq!(response["content"]["header"]["file_name"], "depth_log.xml");
    assert!(response["content"]["header"]["error"].is_null());

    let data = &response["content"]["data"];
    assert_eq!(data["data_type"], "log");
    assert_eq!(data["metadata"]["version"], "1.4.1.1");
    assert_eq!(data["metadata"]["logName"], "Alpha-1 Depth Log");
    assert_eq!(data["metadata"]["wellUid"], "w-alpha");

    let log = &data["content"]["logs"]["log-alpha-depth"];
    assert_eq!(log["curves"].as_array().unwrap().len(), 4);
    assert_eq!(log["curves"][0]["mnemonic"], "DEPTH");
    assert_eq!(log["curves"][0]["index"], true);
    assert_eq!(log["curves"][3]["unit"], "gAPI");
    assert_eq!(log["data"]["values"].as_array().unwrap().len(), 6);
    assert_eq!(log["data"]["values"][0][0], "1500.0");
    assert_eq!(log["metadata"]["startIndex"], "1500");
}

#[tokio::test]
async fn test_get_messages_content() {
    let app = test_app().await;
    let id = app.file_id("messages.xml");

    let (status, response) = get(app.app(), &format!("/files/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let data = &response["content"]["data"];
    assert_eq!(data["metadata"]["count"], 3);
    let messages = data["content"]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1]["metadata"]["messageType"], "alarm");
    assert_eq!(messages[1]["metadata"]["source"], "Mud Logger");
    assert_eq!(messages[0]["timestamp"], "2024-03-01T07:45:00Z");
}

#[tokio::test]
async fn test_get_unknown_file_returns_404() {
    let app = test_app().await;

    let (status, response) = get(app.app(), "/files/00000000-0000-0000-0000-000000000000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        response["detail"],
        "File with ID 00000000-0000-0000-0000-000000000000 not found"
    );
    assert!(response["timestamp"].is_string());
}

#[tokio::test]
async fn test_malformed_fixture_is_served_as_unknown() {
    let app = test_app().await;
    app.write_fixture("broken.xml", "<logs><log uid=\"x\"><name>Cut off");

    let (status, response) = post_empty(app.app(), "/reload").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["files_count"], FIXTURE_COUNT + 1);

    let (_, response) = get(app.app(), "/files?file_type=unknown").await;
    assert_eq!(response["count"], 1);
    assert_eq!(response["files"][0]["well_name"], "Unknown Well (broken.xml)");

    let id = app.file_id("broken.xml");
    let (status, response) = get(app.app(), &format!("/files/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(response["content"]["header"]["error"].is_string());
    assert_eq!(
        response["content"]["data"]["content"]["raw_content"],
        "<logs><log uid=\"x\"><name>Cut off"
    );
}

#[tokio::test]
async fn test_reload_picks_up_new_fixture() {
    let app = test_app().await;
    app.write_fixture(
        "charlie_wells.xml",
        r#"<wells version="1.4.1.1"><well uid="w-charlie"><name>Charlie-3</name></well></wells>"#,
    );

    let (_, response) = get(app.app(), "/files?well_name=Charlie-3").await;
    assert_eq!(response["count"], 0);

    let (status, response) = post_empty(app.app(), "/reload").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "ok");

    let (_, response) = get(app.app(), "/files?well_name=Charlie-3").await;
    assert_eq!(response["count"], 1);
    assert_eq!(response["files"][0]["file_type"], "well");
}
