//! Processed WITSML data model.
//!
//! These types are the JSON shape served for every loaded fixture. Field names
//! follow the WITSML camelCase convention inside `metadata` blocks and the
//! snake_case convention of the surrounding envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of WITSML document, determined by its root element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DataType {
    /// `<logs>` document.
    #[serde(rename = "log")]
    Log,
    /// `<wells>` document.
    #[serde(rename = "well")]
    Well,
    /// `<wellbores>` document.
    #[serde(rename = "wellbore")]
    Wellbore,
    /// `<messages>` document.
    #[serde(rename = "messages")]
    Messages,
    /// `<mudLogs>` document.
    #[serde(rename = "mudLog")]
    MudLog,
    /// Anything else, including documents that failed to parse.
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl DataType {
    /// Every data type, in the order they are reported by the server.
    pub const ALL: [Self; 6] = [
        Self::Log,
        Self::Well,
        Self::Wellbore,
        Self::Messages,
        Self::MudLog,
        Self::Unknown,
    ];

    /// Returns the wire name of the data type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Well => "well",
            Self::Wellbore => "wellbore",
            Self::Messages => "messages",
            Self::MudLog => "mudLog",
            Self::Unknown => "unknown",
        }
    }

    /// Maps a (namespace-free) document root element to its data type.
    #[must_use]
    pub fn from_root_element(root: &str) -> Self {
        match root {
            "logs" => Self::Log,
            "wells" => Self::Well,
            "wellbores" => Self::Wellbore,
            "messages" => Self::Messages,
            "mudLogs" => Self::MudLog,
            _ => Self::Unknown,
        }
    }

    /// Returns the element name of a single object inside a document of this type.
    #[must_use]
    pub fn object_element(self) -> Option<&'static str> {
        match self {
            Self::Log => Some("log"),
            Self::Well => Some("well"),
            Self::Wellbore => Some("wellbore"),
            Self::Messages => Some("message"),
            Self::MudLog => Some("mudLog"),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised data type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown WITSML data type: {0}")]
pub struct ParseDataTypeError(pub String);

impl FromStr for DataType {
    type Err = ParseDataTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseDataTypeError(s.to_string()))
    }
}

/// Document-level metadata extracted during processing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WitsmlMetadata {
    /// Data type of the document.
    #[serde(rename = "type")]
    pub data_type: DataType,
    /// WITSML schema version, or `"unknown"`.
    pub version: String,
    /// Name of the (first) well.
    pub well_name: Option<String>,
    /// UID of the referenced well.
    pub well_uid: Option<String>,
    /// UID of the referenced wellbore.
    pub wellbore_uid: Option<String>,
    /// Number of objects (messages).
    pub count: Option<usize>,
    /// Field of the (first) well.
    pub field: Option<String>,
    /// Name of the (first) log.
    pub log_name: Option<String>,
    /// Index type of the (first) log.
    pub index_type: Option<String>,
}

/// Well metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellMetadata {
    /// Well name.
    pub name: String,
    /// Field the well belongs to.
    pub field: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Operating company.
    pub operator: Option<String>,
    /// Time zone offset.
    pub time_zone: Option<String>,
}

/// A well entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellInfo {
    /// Well uid.
    pub uid: String,
    /// Object metadata.
    pub metadata: WellMetadata,
}

/// Wellbore metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellboreMetadata {
    /// Wellbore name.
    pub name: String,
    /// Operator wellbore number.
    pub number: Option<String>,
    /// UID of the parent well.
    pub well_uid: String,
}

/// A wellbore entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellboreInfo {
    /// Wellbore uid.
    pub uid: String,
    /// Object metadata.
    pub metadata: WellboreMetadata,
}

/// A log curve definition (`logCurveInfo`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveInfo {
    /// Curve mnemonic, e.g. `GR`.
    pub mnemonic: String,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Free-text curve description.
    pub description: Option<String>,
    /// `true` when this curve is the log's index curve.
    pub index: Option<bool>,
}

/// Log header metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogMetadata {
    /// Log name.
    pub name: String,
    /// UID of the parent well.
    pub well_uid: String,
    /// UID of the parent wellbore.
    pub wellbore_uid: String,
    /// Index type, e.g. `measured depth` or `date time`.
    pub index_type: Option<String>,
    /// First index value.
    pub start_index: Option<String>,
    /// Last index value.
    pub end_index: Option<String>,
}

/// Log data rows, one value per curve.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogData {
    /// Rows of raw values in curve order.
    pub values: Vec<Vec<String>>,
}

/// A log entry with curves and optional data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogInfo {
    /// Log uid.
    pub uid: String,
    /// Object metadata.
    pub metadata: LogMetadata,
    /// Curve definitions in column order.
    pub curves: Vec<CurveInfo>,
    /// Data rows, absent for header-only logs.
    pub data: Option<LogData>,
}

impl LogInfo {
    /// Number of data rows in the log.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.as_ref().map_or(0, |d| d.values.len())
    }

    /// Position of the index curve among the curves, defaulting to the first.
    #[must_use]
    pub fn index_column(&self) -> usize {
        self.curves
            .iter()
            .position(|c| c.index == Some(true))
            .unwrap_or(0)
    }
}

/// Message metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    /// UID of the referenced well.
    pub well_uid: Option<String>,
    /// UID of the referenced wellbore.
    pub wellbore_uid: Option<String>,
    /// Who raised the message.
    pub source: Option<String>,
    /// Message category (`typeMessage`).
    pub message_type: Option<String>,
}

/// A WITSML message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageInfo {
    /// Message uid.
    pub uid: String,
    /// Object metadata.
    pub metadata: MessageMetadata,
    /// Message text.
    pub text: String,
    /// When the message was raised.
    pub timestamp: Option<DateTime<Utc>>,
}

/// A geological interval from a mud log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeologicalInterval {
    /// Measured depth of the top of the interval.
    pub top: f64,
    /// Measured depth of the base of the interval.
    pub base: f64,
    /// Dominant lithology.
    pub lithology: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
}

/// Mud log metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MudLogMetadata {
    /// Mud log name.
    pub name: String,
    /// UID of the parent well.
    pub well_uid: String,
    /// UID of the parent wellbore.
    pub wellbore_uid: String,
}

/// A mud log with its intervals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MudLogInfo {
    /// Mud log uid.
    pub uid: String,
    /// Object metadata.
    pub metadata: MudLogMetadata,
    /// Geological intervals, top to bottom as listed.
    pub intervals: Vec<GeologicalInterval>,
}

/// Objects addressed by a WITSML `uid`.
pub trait Keyed {
    /// The object's uid.
    fn uid(&self) -> &str;
}

macro_rules! impl_keyed {
    ($($ty:ty),*) => {
        $(impl Keyed for $ty {
            fn uid(&self) -> &str {
                &self.uid
            }
        })*
    };
}

impl_keyed!(WellInfo, WellboreInfo, LogInfo, MudLogInfo);

/// Serializes `Option<Vec<T>>` as a JSON object keyed by uid, in document order.
mod uid_map {
    use super::Keyed;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S, T>(items: &Option<Vec<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Keyed + Serialize,
    {
        match items {
            None => serializer.serialize_none(),
            Some(items) => {
                let mut map = serializer.serialize_map(Some(items.len()))?;
                for item in items {
                    map.serialize_entry(item.uid(), item)?;
                }
                map.end()
            }
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        let map: Option<BTreeMap<String, T>> = Option::deserialize(deserializer)?;
        Ok(map.map(|m| m.into_values().collect()))
    }
}

/// Type-specific content of a processed document.
///
/// Exactly one of the collections is populated for a successfully processed
/// document; `raw_content` is set when processing failed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WitsmlContent {
    /// Wells of a well document.
    #[serde(default, with = "uid_map")]
    pub wells: Option<Vec<WellInfo>>,
    /// Wellbores of a wellbore document.
    #[serde(default, with = "uid_map")]
    pub wellbores: Option<Vec<WellboreInfo>>,
    /// Logs of a log document.
    #[serde(default, with = "uid_map")]
    pub logs: Option<Vec<LogInfo>>,
    /// Messages of a messages document.
    #[serde(default)]
    pub messages: Option<Vec<MessageInfo>>,
    /// Mud logs of a mud log document.
    #[serde(default, with = "uid_map")]
    pub mud_logs: Option<Vec<MudLogInfo>>,
    /// Excerpt of the raw file when processing failed.
    #[serde(default, rename = "raw_content")]
    pub raw_content: Option<String>,
}

impl WitsmlContent {
    /// Returns the first log of the document, if any.
    #[must_use]
    pub fn first_log(&self) -> Option<&LogInfo> {
        self.logs.as_ref().and_then(|logs| logs.first())
    }
}

/// A fully processed WITSML document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedData {
    /// Data type of the document.
    pub data_type: DataType,
    /// Extracted metadata.
    pub metadata: WitsmlMetadata,
    /// Type-specific content.
    pub content: WitsmlContent,
    /// When the document was processed.
    pub processed_at: DateTime<Utc>,
}

impl ProcessedData {
    /// Builds the placeholder served for a document that could not be processed.
    ///
    /// `raw` is truncated to [`RAW_CONTENT_LIMIT`] characters with a trailing `...`.
    #[must_use]
    pub fn unprocessable(raw: &str) -> Self {
        Self {
            data_type: DataType::Unknown,
            metadata: WitsmlMetadata {
                version: "unknown".to_string(),
                ..WitsmlMetadata::default()
            },
            content: WitsmlContent {
                raw_content: Some(truncate_raw(raw)),
                ..WitsmlContent::default()
            },
            processed_at: Utc::now(),
        }
    }
}

/// Maximum number of characters of raw content kept for unprocessable files.
pub const RAW_CONTENT_LIMIT: usize = 1000;

fn truncate_raw(raw: &str) -> String {
    match raw.char_indices().nth(RAW_CONTENT_LIMIT) {
        Some((cut, _)) => format!("{}...", &raw[..cut]),
        None => raw.to_string(),
    }
}
