//! Well Log Shared Library
//!
//! This crate contains the WITSML parsing, processing and catalog types used
//! by the fixture server and the `welllog` CLI.
//!
//! # Modules
//!
//! - [`witsml`] - XML parsing and WITSML document processing
//! - [`models`] - Processed WITSML data and file catalog records
//! - [`loader`] - Loading fixtures from a data directory
//! - [`storage`] - Catalog storage traits and implementations
//! - [`hierarchy`] - Well / wellbore / log navigation across fixtures
//! - [`search`] - Lexical search over loaded fixtures
//!
//! # Example
//!
//! ```
//! use shared::models::DataType;
//! use shared::witsml::WitsmlProcessor;
//!
//! let xml = r#"<wells version="1.4.1.1"><well uid="w-1"><name>Alpha</name></well></wells>"#;
//! let data = WitsmlProcessor::new().process_file(xml).unwrap();
//!
//! assert_eq!(data.data_type, DataType::Well);
//! assert_eq!(data.metadata.well_name.as_deref(), Some("Alpha"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod hierarchy;
pub mod loader;
pub mod models;
pub mod search;
pub mod storage;
pub mod witsml;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
pub use serde_json;
pub use validator;
