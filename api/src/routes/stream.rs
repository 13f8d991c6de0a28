//! Server-sent event replay of log fixtures.
//!
//! Emulates a live rig feed: the first log of a file is sent as a schema event
//! followed by one data event per row, paced by a configurable delay.

use crate::error::ApiError;
use crate::routes::files::find_file;
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use chrono::Utc;
use futures::stream::{self, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use shared::models::{CurveInfo, DataType, StoredFile};
use std::convert::Infallible;
use std::time::Duration;

/// Default delay between data events.
pub const DEFAULT_DELAY_MS: u64 = 10_000;

/// Largest accepted delay between data events.
pub const MAX_DELAY_MS: u64 = 600_000;

/// Query parameters for streaming.
#[derive(Debug, Default, Deserialize)]
pub struct StreamParams {
    /// Delay between data events in milliseconds.
    pub delay: Option<u64>,
}

#[derive(Debug, Serialize)]
struct StreamMetadata<'a> {
    file_name: &'a str,
    well_name: &'a str,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct StreamSchema<'a> {
    log_uid: &'a str,
    curves: &'a [CurveInfo],
}

#[derive(Debug, Serialize)]
struct DataPoint<'a> {
    log_uid: &'a str,
    index: usize,
    timestamp: String,
    values: &'a [String],
}

#[derive(Debug, Serialize)]
struct StreamNotice {
    #[serde(rename = "type")]
    kind: &'static str,
    message: &'static str,
}

/// Creates the streaming routes.
pub fn stream_routes(state: AppState) -> Router {
    Router::new()
        .route("/files/{file_id}/stream", get(stream_log_data))
        .with_state(state)
}

async fn stream_log_data(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
    params: Result<Query<StreamParams>, QueryRejection>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let Query(params) = params?;
    let delay_ms = params.delay.unwrap_or(DEFAULT_DELAY_MS);
    if delay_ms > MAX_DELAY_MS {
        return Err(ApiError::BadRequest(format!(
            "delay must be between 0 and {MAX_DELAY_MS} milliseconds"
        )));
    }

    let file = find_file(&state, &file_id)?;
    if file.info.file_type != DataType::Log {
        return Err(ApiError::BadRequest(
            "Only log files can be streamed".to_string(),
        ));
    }

    tracing::info!(
        file_id = %file_id,
        file = %file.info.name,
        delay_ms,
        "Starting log stream"
    );

    let replay = Replay::new(&file, Duration::from_millis(delay_ms));
    let events = stream::unfold(replay, Replay::next_event).map(Ok);

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

fn json_event(name: &str, payload: &impl Serialize) -> Event {
    match Event::default().event(name).json_data(payload) {
        Ok(event) => event,
        Err(e) => {
            tracing::error!(error = %e, event = name, "Failed to encode stream event");
            Event::default().event("error").data(e.to_string())
        }
    }
}

/// Events of one replay, built from a snapshot of the file.
///
/// Rows are pre-encoded so the stream never touches the catalog again and a
/// concurrent reload cannot affect it.
struct Replay {
    head: std::vec::IntoIter<Event>,
    rows: std::vec::IntoIter<Event>,
    end: Option<Event>,
    delay: Duration,
    pause_before_next: bool,
}

impl Replay {
    fn new(file: &StoredFile, delay: Duration) -> Self {
        let metadata = json_event(
            "metadata",
            &StreamMetadata {
                file_name: &file.info.name,
                well_name: &file.info.well_name,
                timestamp: Utc::now().to_rfc3339(),
            },
        );

        let Some(log) = file.content.data.content.first_log() else {
            let error = json_event(
                "error",
                &StreamNotice {
                    kind: "error",
                    message: "No log data available for streaming",
                },
            );
            return Self {
                head: vec![metadata, error].into_iter(),
                rows: Vec::new().into_iter(),
                end: None,
                delay,
                pause_before_next: false,
            };
        };

        let schema = json_event(
            "schema",
            &StreamSchema {
                log_uid: &log.uid,
                curves: &log.curves,
            },
        );

        let started = Utc::now();
        let rows: Vec<Event> = log
            .data
            .iter()
            .flat_map(|d| d.values.iter())
            .enumerate()
            .map(|(index, values)| {
                let offset = chrono::Duration::milliseconds(
                    i64::try_from(index).map_or(i64::MAX, |i| i.saturating_mul(500)),
                );
                json_event(
                    "data",
                    &DataPoint {
                        log_uid: &log.uid,
                        index,
                        timestamp: (started + offset).to_rfc3339(),
                        values,
                    },
                )
            })
            .collect();

        let end = json_event(
            "end",
            &StreamNotice {
                kind: "end",
                message: "Stream complete",
            },
        );

        Self {
            head: vec![metadata, schema].into_iter(),
            rows: rows.into_iter(),
            end: Some(end),
            delay,
            pause_before_next: false,
        }
    }

    /// Yields the next event, sleeping `delay` after every data event.
    async fn next_event(mut self) -> Option<(Event, Self)> {
        if let Some(event) = self.head.next() {
            return Some((event, self));
        }

        if self.pause_before_next {
            tokio::time::sleep(self.delay).await;
        }

        if let Some(row) = self.rows.next() {
            self.pause_before_next = true;
            return Some((row, self));
        }

        self.pause_before_next = false;
        let end = self.end.take()?;
        tracing::debug!("Log stream complete");
        Some((end, self))
    }
}
