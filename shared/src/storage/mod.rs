//! Storage traits and implementations.
//!
//! This module provides the catalog abstraction for loaded WITSML fixtures.
//! The `FileStore` trait defines the interface, allowing different
//! implementations (in-memory, database-backed, etc.).

pub mod file_store;

pub use file_store::{FileQuery, FileStore, FileStoreError, InMemoryFileStore};
