//! Well Log Fixture Server
//!
//! This crate provides the HTTP server that stands in for a live WITSML data
//! source during development and testing. It loads WITSML XML fixtures from a
//! data directory at startup and serves them through an API shaped like the
//! production one.
//!
//! # Architecture
//!
//! The server is built on Axum and Tokio, providing:
//! - File catalog endpoints (`/files`, `/query`, `/reload`)
//! - Server-sent event replay of log fixtures (`/files/{id}/stream`)
//! - Lexical search over the loaded fixtures (`/search`)
//! - WITSML store emulation (`/witsml/...`)
//!
//! # Example
//!
//! ```no_run
//! use api::run_server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     run_server().await
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod error;
mod middleware;
mod routes;
mod state;

pub use config::{Config, LogFormat};
pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

use anyhow::Result;
use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Runs the fixture server.
///
/// This function initializes the server with configuration from environment variables,
/// loads the fixtures and starts listening for incoming connections. It handles graceful
/// shutdown on SIGTERM/SIGINT signals.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The data directory exists but cannot be read
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server() -> Result<()> {
    let config = Config::from_env()?;
    run_server_with_config(config).await
}

/// Runs the fixture server with the provided configuration.
///
/// Fixtures are loaded before the listener is bound, so the first request
/// already sees the full catalog.
///
/// # Errors
///
/// Returns an error if:
/// - The data directory exists but cannot be read
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server_with_config(config: Config) -> Result<()> {
    let addr = config.socket_addr()?;

    tracing::info!(
        host = %config.host,
        port = %config.port,
        data_dir = %config.data_dir.display(),
        "Well log fixture server starting"
    );

    let state = AppState::with_in_memory_store(config.data_dir.clone());
    let report = state.reload().await?;
    tracing::info!(
        files = report.files.len(),
        skipped = report.skipped.len(),
        "Fixtures loaded"
    );

    let app = create_router_with_config(state, &config);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Creates the main application router with all routes and default middleware.
///
/// This function is public to allow testing the router without starting a full server.
pub fn create_router(state: AppState) -> Router {
    create_router_with_config(state, &Config::default())
}

/// Creates the application router using the CORS and timing settings of `config`.
pub fn create_router_with_config(state: AppState, config: &Config) -> Router {
    Router::new()
        .merge(routes::health_routes(state.clone()))
        .merge(routes::files_routes(state.clone()))
        .merge(routes::stream_routes(state.clone()))
        .merge(routes::query_routes(state.clone()))
        .merge(routes::search_routes(state.clone()))
        .merge(routes::witsml_routes(state))
        .layer(axum::middleware::from_fn_with_state(
            config.slow_request_threshold(),
            middleware::log_request_timing,
        ))
        .layer(cors_layer(config.cors_origins.as_deref()))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let allow_origin = match origins {
        None => AllowOrigin::from(Any),
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        tracing::warn!(%origin, error = %e, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
