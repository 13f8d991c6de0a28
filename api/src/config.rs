//! Server configuration module.
//!
//! Handles loading configuration from environment variables with sensible defaults.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Log output format of the server binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Invalid log format '{other}', expected 'text' or 'json'"),
        }
    }
}

/// Server configuration.
///
/// Configuration values can be set via environment variables:
/// - `WELLLOG_HOST`: The host address to bind to (default: "0.0.0.0")
/// - `WELLLOG_PORT`: The port to listen on (default: 8000)
/// - `WELLLOG_DATA_DIR`: Directory holding the WITSML fixtures (default: "data")
/// - `WELLLOG_CORS_ORIGINS`: Comma-separated allowed origins (default: any)
/// - `WELLLOG_SLOW_REQUEST_MS`: Slow request warning threshold (default: 1000)
/// - `WELLLOG_LOG_FORMAT`: `text` or `json` (default: "text")
#[derive(Debug, Clone)]
pub struct Config {
    /// The host address to bind to.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
    /// Directory scanned for `*.xml` fixtures.
    pub data_dir: PathBuf,
    /// Allowed CORS origins; `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
    /// Requests slower than this are logged as warnings.
    pub slow_request_ms: u64,
    /// Log output format.
    pub log_format: LogFormat,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `WELLLOG_PORT` is set but cannot be parsed as a valid port number
    /// - `WELLLOG_SLOW_REQUEST_MS` is set but is not a non-negative integer
    /// - `WELLLOG_LOG_FORMAT` is neither `text` nor `json`
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = env_var("WELLLOG_HOST").unwrap_or(defaults.host);

        let port = env_var("WELLLOG_PORT")
            .map(|p| p.parse::<u16>())
            .transpose()
            .context("WELLLOG_PORT must be a valid port number")?
            .unwrap_or(defaults.port);

        let data_dir = env_var("WELLLOG_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);

        let cors_origins = env_var("WELLLOG_CORS_ORIGINS").map(|origins| parse_origins(&origins));

        let slow_request_ms = env_var("WELLLOG_SLOW_REQUEST_MS")
            .map(|ms| ms.parse::<u64>())
            .transpose()
            .context("WELLLOG_SLOW_REQUEST_MS must be a number of milliseconds")?
            .unwrap_or(defaults.slow_request_ms);

        let log_format = env_var("WELLLOG_LOG_FORMAT")
            .map(|f| f.parse::<LogFormat>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            data_dir,
            cors_origins,
            slow_request_ms,
            log_format,
        })
    }

    /// Returns the socket address for binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the host and port combination is not a valid socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Returns the slow request threshold.
    #[must_use]
    pub fn slow_request_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_request_ms)
    }
}

fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            data_dir: PathBuf::from("data"),
            cors_origins: None,
            slow_request_ms: 1000,
            log_format: LogFormat::Text,
        }
    }
}
