//! API middleware layers.
//!
//! Currently provides request timing with slow-request warnings.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::time::{Duration, Instant};

/// Axum middleware that logs every request with its duration.
///
/// Requests taking longer than the threshold held in the state are logged at
/// `warn` level.
pub async fn log_request_timing(
    State(slow_threshold): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let elapsed = started.elapsed();
    let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    let status = response.status().as_u16();

    if elapsed > slow_threshold {
        tracing::warn!(%method, %path, status, elapsed_ms, "Slow request");
    } else {
        tracing::info!(%method, %path, status, elapsed_ms, "Request completed");
    }

    response
}
