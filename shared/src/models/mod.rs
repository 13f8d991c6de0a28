//! Data models for the Well Log RAG fixture server.
//!
//! This module contains the processed WITSML structures and the catalog
//! records for loaded fixture files.

pub mod file;
pub mod witsml;

pub use file::{DataHeader, FileContent, FileInfo, FileMetadata, StoredFile};
pub use witsml::{
    CurveInfo, DataType, GeologicalInterval, Keyed, LogData, LogInfo, LogMetadata, MessageInfo,
    MessageMetadata, MudLogInfo, MudLogMetadata, ParseDataTypeError, ProcessedData, WellInfo,
    WellMetadata, WellboreInfo, WellboreMetadata, WitsmlContent, WitsmlMetadata,
    RAW_CONTENT_LIMIT,
};
