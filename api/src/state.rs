//! Application state module.
//!
//! Defines the shared application state that is passed to route handlers.

use crate::error::ApiError;
use shared::loader::{FixtureLoader, LoadReport};
use shared::models::StoredFile;
use shared::storage::{FileQuery, FileStore, InMemoryFileStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Application state shared across all request handlers.
///
/// Holds the fixture catalog and the data directory it was loaded from.
#[derive(Clone)]
pub struct AppState {
    /// The fixture catalog.
    file_store: Arc<dyn FileStore>,
    /// Directory scanned for fixtures.
    data_dir: Arc<PathBuf>,
    loader: FixtureLoader,
}

impl AppState {
    /// Creates a new application state with the given store.
    pub fn new(file_store: Arc<dyn FileStore>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            file_store,
            data_dir: Arc::new(data_dir.into()),
            loader: FixtureLoader::new(),
        }
    }

    /// Creates a new application state with an empty in-memory catalog.
    #[must_use]
    pub fn with_in_memory_store(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(InMemoryFileStore::new()), data_dir)
    }

    /// Returns a reference to the file store.
    #[must_use]
    pub fn file_store(&self) -> &dyn FileStore {
        self.file_store.as_ref()
    }

    /// Returns the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns a snapshot of every loaded file, in load order.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read.
    pub fn all_files(&self) -> Result<Vec<StoredFile>, ApiError> {
        Ok(self.file_store.list(&FileQuery::new())?)
    }

    /// Rescans the data directory and replaces the catalog.
    ///
    /// The directory is scanned on a blocking thread; the catalog is swapped
    /// in a single write once the scan is complete.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed or the catalog
    /// cannot be updated. The previous catalog is kept in that case.
    pub async fn reload(&self) -> Result<LoadReport, ApiError> {
        let loader = self.loader;
        let data_dir = Arc::clone(&self.data_dir);

        let report = tokio::task::spawn_blocking(move || loader.load_directory(&data_dir))
            .await
            .map_err(|e| ApiError::Internal(format!("Fixture loading task failed: {e}")))??;

        self.file_store.replace_all(report.files.clone())?;
        Ok(report)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_in_memory_store("data")
    }
}
