//! Common test utilities and helpers for integration tests.
//!
//! This module provides shared functionality used across all integration tests,
//! including fixture directory setup and HTTP request helpers.

use api::{create_router, AppState};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Number of fixtures shipped in the repository `data/` directory.
pub const FIXTURE_COUNT: usize = 6;

/// Returns the repository `data/` directory.
pub fn repo_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../data")
}

/// Test server backed by a private copy of the repository fixtures.
///
/// The temporary directory is removed when this value is dropped, so keep it
/// alive for the duration of the test.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub dir: TempDir,
}

impl TestApp {
    /// Returns a clone of the router for a single request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Writes a fixture file into the data directory.
    pub fn write_fixture(&self, name: &str, content: &str) {
        fs::write(self.dir.path().join(name), content).unwrap();
    }

    /// Returns the id of the loaded file with the given name.
    pub fn file_id(&self, name: &str) -> String {
        self.state
            .all_files()
            .unwrap()
            .into_iter()
            .find(|f| f.info.name == name)
            .map(|f| f.info.id)
            .unwrap_or_else(|| panic!("fixture {name} not loaded"))
    }
}

/// Creates a test server loaded with the repository fixtures.
pub async fn test_app() -> TestApp {
    let dir = TempDir::new().unwrap();
    for entry in fs::read_dir(repo_data_dir()).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().is_some_and(|ext| ext == "xml") {
            fs::copy(&path, dir.path().join(path.file_name().unwrap())).unwrap();
        }
    }
    build_app(dir).await
}

/// Creates a test server over an empty data directory.
pub async fn empty_app() -> TestApp {
    build_app(TempDir::new().unwrap()).await
}

async fn build_app(dir: TempDir) -> TestApp {
    let state = AppState::with_in_memory_store(dir.path());
    state.reload().await.unwrap();
    let router = create_router(state.clone());
    TestApp { router, state, dir }
}

/// Helper to make a POST request with JSON body.
///
/// # Arguments
///
/// * `app` - The Axum router to send the request to
/// * `uri` - The URI path to POST to
/// * `body` - The JSON body to send
///
/// # Returns
///
/// A tuple containing the response status code and parsed JSON response body.
pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Helper to make a POST request without a body.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Helper to make a GET request.
///
/// # Returns
///
/// A tuple containing the response status code and parsed JSON response body.
pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = get_text(app, uri).await;
    let json: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Helper to make a GET request and read the raw body.
///
/// # Returns
///
/// The response status, its content type and the body as text.
pub async fn get_text(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (
        status,
        content_type,
        String::from_utf8_lossy(&body_bytes).into_owned(),
    )
}

/// Splits a server-sent event body into `(event, data)` pairs.
pub fn parse_sse(body: &str) -> Vec<(String, Value)> {
    body.split("\n\n")
        .filter_map(|frame| {
            let mut event = None;
            let mut data = None;
            for line in frame.lines() {
                if let Some(name) = line.strip_prefix("event:") {
                    event = Some(name.trim().to_string());
                } else if let Some(payload) = line.strip_prefix("data:") {
                    data = serde_json::from_str(payload.trim()).ok();
                }
            }
            Some((event?, data?))
        })
        .collect()
}
