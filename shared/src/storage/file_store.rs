//! Fixture file catalog trait and in-memory implementation.
//!
//! Provides the `FileStore` trait for abstracting catalog operations and an
//! `InMemoryFileStore` implementation holding every loaded fixture.

use crate::models::{DataType, StoredFile};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors that can occur during file store operations.
#[derive(Debug, Error)]
pub enum FileStoreError {
    /// Failed to acquire lock on the store.
    #[error("Failed to acquire lock on file store")]
    LockError,

    /// A file with the same id is already stored.
    #[error("File with ID {0} already exists")]
    DuplicateId(String),
}

/// Query parameters for listing files.
///
/// Single-value filters (`well_name`, `file_type`) and multi-value filters
/// (`well_names`, `file_types`) combine with AND; an empty multi-value list
/// is no filter. Metadata filters compare `FileInfo.metadata` fields by name
/// and an unknown field name matches nothing.
#[derive(Debug, Clone, Default)]
pub struct FileQuery {
    /// Filter by well name (exact match).
    pub well_name: Option<String>,

    /// Filter by file type (exact match on the wire name).
    pub file_type: Option<String>,

    /// Keep files whose well name is one of these.
    pub well_names: Option<Vec<String>>,

    /// Keep files whose type is one of these.
    pub file_types: Option<Vec<DataType>>,

    /// Keep files created at or after this time.
    pub created_after: Option<DateTime<Utc>>,

    /// Keep files created at or before this time.
    pub created_before: Option<DateTime<Utc>>,

    /// Keep files whose metadata fields equal these values.
    pub metadata: Option<HashMap<String, String>>,
}

impl FileQuery {
    /// Creates a new empty query (returns all files).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the well name filter.
    #[must_use]
    pub fn with_well_name(mut self, well_name: impl Into<String>) -> Self {
        self.well_name = Some(well_name.into());
        self
    }

    /// Sets the file type filter.
    #[must_use]
    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = Some(file_type.into());
        self
    }

    /// Sets the accepted well names.
    #[must_use]
    pub fn with_well_names(mut self, well_names: Vec<String>) -> Self {
        self.well_names = Some(well_names);
        self
    }

    /// Sets the accepted file types.
    #[must_use]
    pub fn with_file_types(mut self, file_types: Vec<DataType>) -> Self {
        self.file_types = Some(file_types);
        self
    }

    /// Sets the creation time range (inclusive on both ends).
    #[must_use]
    pub fn with_created_between(
        mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_after = start;
        self.created_before = end;
        self
    }

    /// Sets the metadata field filters.
    #[must_use]
    pub fn with_metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns `true` if the file passes every filter of this query.
    #[must_use]
    pub fn matches(&self, file: &StoredFile) -> bool {
        let info = &file.info;

        if let Some(ref well_name) = self.well_name {
            if &info.well_name != well_name {
                return false;
            }
        }

        if let Some(ref file_type) = self.file_type {
            if info.file_type.as_str() != file_type {
                return false;
            }
        }

        if let Some(ref well_names) = self.well_names {
            if !well_names.is_empty() && !well_names.contains(&info.well_name) {
                return false;
            }
        }

        if let Some(ref file_types) = self.file_types {
            if !file_types.is_empty() && !file_types.contains(&info.file_type) {
                return false;
            }
        }

        if let Some(start) = self.created_after {
            if info.created_at < start {
                return false;
            }
        }

        if let Some(end) = self.created_before {
            if info.created_at > end {
                return false;
            }
        }

        if let Some(ref metadata) = self.metadata {
            let all_match = metadata
                .iter()
                .all(|(key, value)| info.metadata.field(key) == Some(value.as_str()));
            if !all_match {
                return false;
            }
        }

        true
    }
}

/// Trait for fixture catalog implementations.
///
/// Implementations must be thread-safe (Send + Sync) and preserve insertion
/// order when listing.
pub trait FileStore: Send + Sync {
    /// Inserts a single file into the store.
    ///
    /// # Errors
    ///
    /// Returns an error if a file with the same id exists or the lock is poisoned.
    fn insert(&self, file: StoredFile) -> Result<(), FileStoreError>;

    /// Returns the file with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn get(&self, id: &str) -> Result<Option<StoredFile>, FileStoreError>;

    /// Lists files matching the query, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn list(&self, query: &FileQuery) -> Result<Vec<StoredFile>, FileStoreError>;

    /// Returns the number of files in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the count operation fails.
    fn count(&self) -> Result<usize, FileStoreError>;

    /// Replaces the entire catalog in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if the new set contains duplicate ids or the lock is poisoned.
    fn replace_all(&self, files: Vec<StoredFile>) -> Result<(), FileStoreError>;

    /// Clears all files from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the clear operation fails.
    fn clear(&self) -> Result<(), FileStoreError>;
}

/// In-memory file store implementation.
///
/// Files are kept in a `Vec` protected by a `RwLock`, in load order.
///
/// # Example
///
/// ```
/// use shared::storage::{FileQuery, FileStore, InMemoryFileStore};
///
/// let store = InMemoryFileStore::new();
/// assert_eq!(store.count().unwrap(), 0);
/// assert!(store.list(&FileQuery::new()).unwrap().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryFileStore {
    files: Arc<RwLock<Vec<StoredFile>>>,
}

impl InMemoryFileStore {
    /// Creates a new empty in-memory file store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a new in-memory file store wrapped in an Arc.
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

fn check_unique(files: &[StoredFile]) -> Result<(), FileStoreError> {
    let mut seen = std::collections::HashSet::new();
    for file in files {
        if !seen.insert(file.id()) {
            return Err(FileStoreError::DuplicateId(file.id().to_string()));
        }
    }
    Ok(())
}

impl FileStore for InMemoryFileStore {
    fn insert(&self, file: StoredFile) -> Result<(), FileStoreError> {
        let mut files = self.files.write().map_err(|_| FileStoreError::LockError)?;
        if files.iter().any(|f| f.id() == file.id()) {
            return Err(FileStoreError::DuplicateId(file.info.id));
        }
        files.push(file);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<StoredFile>, FileStoreError> {
        let files = self.files.read().map_err(|_| FileStoreError::LockError)?;
        Ok(files.iter().find(|f| f.id() == id).cloned())
    }

    fn list(&self, query: &FileQuery) -> Result<Vec<StoredFile>, FileStoreError> {
        let files = self.files.read().map_err(|_| FileStoreError::LockError)?;
        Ok(files.iter().filter(|f| query.matches(f)).cloned().collect())
    }

    fn count(&self) -> Result<usize, FileStoreError> {
        let files = self.files.read().map_err(|_| FileStoreError::LockError)?;
        Ok(files.len())
    }

    fn replace_all(&self, new_files: Vec<StoredFile>) -> Result<(), FileStoreError> {
        check_unique(&new_files)?;
        let mut files = self.files.write().map_err(|_| FileStoreError::LockError)?;
        *files = new_files;
        Ok(())
    }

    fn clear(&self) -> Result<(), FileStoreError> {
        let mut files = self.files.write().map_err(|_| FileStoreError::LockError)?;
        files.clear();
        Ok(())
    }
}
