//! Fixture file records.
//!
//! A [`StoredFile`] pairs the catalog entry ([`FileInfo`]) of a loaded WITSML
//! fixture with its processed content ([`FileContent`]).

use super::witsml::{DataType, ProcessedData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a fixture came from on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Path the file was loaded from.
    pub path: String,
    /// File name as found in the data directory.
    pub original_name: String,
}

impl FileMetadata {
    /// Returns the value of the field with the given wire name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "path" => Some(&self.path),
            "original_name" => Some(&self.original_name),
            _ => None,
        }
    }
}

/// Catalog entry for a loaded fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Identifier assigned at load time (UUID v4).
    pub id: String,
    /// File name.
    pub name: String,
    /// Name of the well the file describes.
    pub well_name: String,
    /// WITSML data type of the file.
    pub file_type: DataType,
    /// Size of the file content in bytes.
    pub size: usize,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// On-disk origin.
    pub metadata: FileMetadata,
}

impl FileInfo {
    /// Fallback well name for files that do not name a well.
    #[must_use]
    pub fn unknown_well_name(file_name: &str) -> String {
        format!("Unknown Well ({file_name})")
    }
}

/// Header attached to processed content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataHeader {
    /// Name of the file.
    pub file_name: String,
    /// Processing error, when the file could not be processed.
    pub error: Option<String>,
}

/// Processed content of a fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileContent {
    /// Header information.
    pub header: DataHeader,
    /// Processed WITSML data.
    pub data: ProcessedData,
}

/// A loaded fixture: catalog entry plus content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    /// Catalog entry.
    pub info: FileInfo,
    /// Processed content.
    pub content: FileContent,
}

impl StoredFile {
    /// Returns the file id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.info.id
    }

    /// Returns `true` if the file failed to process.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.content.header.error.is_some()
    }
}
