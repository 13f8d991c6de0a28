//! Fixture loader.
//!
//! Scans a data directory for WITSML XML files and turns each one into a
//! [`StoredFile`]. Fixture problems never abort a load: unreadable files are
//! skipped and malformed XML is kept as an `unknown` file carrying the parse
//! error and a raw content excerpt.

use crate::models::{
    DataHeader, DataType, FileContent, FileInfo, FileMetadata, ProcessedData, StoredFile,
};
use crate::witsml::WitsmlProcessor;
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extension of WITSML fixtures.
pub const FIXTURE_EXTENSION: &str = "xml";

/// Errors that can occur while loading fixtures.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The data directory exists but could not be listed.
    #[error("Failed to read data directory {}: {source}", path.display())]
    ReadDir {
        /// The data directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A fixture file could not be read as UTF-8 text.
    #[error("Failed to read fixture {}: {source}", path.display())]
    ReadFile {
        /// The fixture path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// A fixture that was skipped during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path of the skipped file.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// Outcome of loading a data directory.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Files that were loaded, in file name order.
    pub files: Vec<StoredFile>,
    /// Files that could not be read.
    pub skipped: Vec<SkippedFile>,
}

impl LoadReport {
    /// Number of files that failed to parse but were still loaded.
    #[must_use]
    pub fn unprocessed_count(&self) -> usize {
        self.files.iter().filter(|f| f.has_error()).count()
    }
}

/// Loads WITSML fixtures from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureLoader {
    processor: WitsmlProcessor,
}

impl FixtureLoader {
    /// Creates a new loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            processor: WitsmlProcessor::new(),
        }
    }

    /// Loads every `*.xml` file directly inside `dir`.
    ///
    /// A missing directory yields an empty report.
    ///
    /// # Errors
    ///
    /// Returns an error only if the directory exists but cannot be listed.
    pub fn load_directory(&self, dir: &Path) -> Result<LoadReport, LoaderError> {
        if !dir.exists() {
            tracing::warn!(data_dir = %dir.display(), "Data directory does not exist, no fixtures loaded");
            return Ok(LoadReport::default());
        }

        let entries = fs::read_dir(dir).map_err(|source| LoaderError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().is_some_and(|ext| ext == FIXTURE_EXTENSION)
            })
            .collect();
        paths.sort();

        tracing::info!(count = paths.len(), data_dir = %dir.display(), "Found WITSML files");

        let mut report = LoadReport::default();
        for path in paths {
            match self.load_file(&path) {
                Ok(file) => report.files.push(file),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable fixture");
                    report.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            loaded = report.files.len(),
            unprocessed = report.unprocessed_count(),
            skipped = report.skipped.len(),
            data_dir = %dir.display(),
            "Loaded WITSML fixtures"
        );

        Ok(report)
    }

    /// Loads a single fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read as UTF-8 text.
    pub fn load_file(&self, path: &Path) -> Result<StoredFile, LoaderError> {
        let read_error = |source| LoaderError::ReadFile {
            path: path.to_path_buf(),
            source,
        };

        let content = fs::read_to_string(path).map_err(read_error)?;
        let fs_metadata = fs::metadata(path).map_err(read_error)?;

        let updated_at = fs_metadata
            .modified()
            .map_or_else(|_| Utc::now(), DateTime::<Utc>::from);
        let created_at = fs_metadata
            .created()
            .map_or(updated_at, DateTime::<Utc>::from);

        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        Ok(self.load_content(&name, &path.display().to_string(), &content, created_at, updated_at))
    }

    /// Builds a stored file from fixture content already in memory.
    #[must_use]
    pub fn load_content(
        &self,
        name: &str,
        path: &str,
        content: &str,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> StoredFile {
        tracing::debug!(file = name, size = content.len(), "Processing fixture");

        let (well_name, file_type, data, error) =
            match self.processor.parser().parse_xml(content) {
                Ok(document) => {
                    let well_name = self
                        .processor
                        .well_name(&document)
                        .unwrap_or_else(|| FileInfo::unknown_well_name(name));
                    let data = self.processor.process_document(&document);

                    let rows: usize = data
                        .content
                        .logs
                        .iter()
                        .flatten()
                        .map(|log| log.row_count())
                        .sum();
                    tracing::debug!(
                        file = name,
                        data_type = %data.data_type,
                        rows,
                        "Processed fixture"
                    );

                    (well_name, document.data_type, data, None)
                }
                Err(e) => {
                    tracing::error!(file = name, error = %e, "Error parsing fixture");
                    (
                        FileInfo::unknown_well_name(name),
                        DataType::Unknown,
                        ProcessedData::unprocessable(content),
                        Some(e.to_string()),
                    )
                }
            };

        StoredFile {
            info: FileInfo {
                id: uuid::Uuid::new_v4().to_string(),
                name: name.to_string(),
                well_name,
                file_type,
                size: content.len(),
                created_at,
                updated_at,
                metadata: FileMetadata {
                    path: path.to_string(),
                    original_name: name.to_string(),
                },
            },
            content: FileContent {
                header: DataHeader {
                    file_name: name.to_string(),
                    error,
                },
                data,
            },
        }
    }
}
