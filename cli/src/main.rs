//! Well Log CLI
//!
//! Command-line interface for the WITSML fixture server.
//!
//! # Usage
//!
//! ```bash
//! welllog --help
//! welllog health
//! welllog files --well-name Alpha-1 --file-type log
//! welllog file <id>
//! welllog inspect data/depth_log.xml
//! ```

#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use shared::loader::FixtureLoader;
use std::path::{Path, PathBuf};

/// Well Log CLI - WITSML fixture server command-line interface
#[derive(Parser)]
#[command(name = "welllog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API server URL
    #[arg(
        short,
        long,
        env = "WELLLOG_API_URL",
        default_value = "http://localhost:8000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API server health
    Health,

    /// List loaded files
    Files {
        /// Only files of this well
        #[arg(long)]
        well_name: Option<String>,

        /// Only files of this type (log, well, wellbore, messages, mudLog, unknown)
        #[arg(long)]
        file_type: Option<String>,
    },

    /// Show a loaded file with its processed content
    File {
        /// File id as returned by `files`
        id: String,
    },

    /// Parse and process a local WITSML file without a server
    Inspect {
        /// Path to the XML file
        path: PathBuf,
    },
}

/// Thin client for the fixture server API.
struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("{url} returned {status}: {}", error_detail(&body));
        }

        response
            .json()
            .await
            .with_context(|| format!("Invalid JSON from {url}"))
    }
}

/// Extracts the server's `detail` message, falling back to the raw body for
/// responses that are not the JSON error envelope.
fn error_detail(body: &str) -> String {
    let body = body.trim();
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(detail)) => detail.clone(),
            Some(detail) => detail.to_string(),
            None => body.to_string(),
        },
        _ if body.is_empty() => "no detail".to_string(),
        _ => body.to_string(),
    }
}

/// Processes a local fixture exactly as the server would and returns its JSON.
fn inspect_file(path: &Path) -> Result<Value> {
    let file = FixtureLoader::new()
        .load_file(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(serde_json::json!({
        "info": file.info,
        "content": file.content,
    }))
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url);

    match cli.command {
        Some(Commands::Health) => {
            let health = client.get("/health", &[]).await?;
            println!(
                "{} - {} files loaded from {}",
                health["status"].as_str().unwrap_or("unknown"),
                health["files_loaded"],
                health["data_dir"].as_str().unwrap_or("?")
            );
        }
        Some(Commands::Files {
            well_name,
            file_type,
        }) => {
            let mut query = Vec::new();
            if let Some(well_name) = well_name.as_deref() {
                query.push(("well_name", well_name));
            }
            if let Some(file_type) = file_type.as_deref() {
                query.push(("file_type", file_type));
            }

            let list = client.get("/files", &query).await?;
            for file in list["files"].as_array().into_iter().flatten() {
                println!(
                    "{}  {:<9} {:<20} {}",
                    file["id"].as_str().unwrap_or_default(),
                    file["file_type"].as_str().unwrap_or_default(),
                    file["well_name"].as_str().unwrap_or_default(),
                    file["name"].as_str().unwrap_or_default()
                );
            }
            println!("{} file(s)", list["count"]);
        }
        Some(Commands::File { id }) => {
            let file = client.get(&format!("/files/{id}"), &[]).await?;
            print_json(&file)?;
        }
        Some(Commands::Inspect { path }) => {
            print_json(&inspect_file(&path)?)?;
        }
        None => {
            println!("Well Log CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
