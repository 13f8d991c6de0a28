//! WITSML processor.
//!
//! Transforms parsed WITSML documents into [`ProcessedData`]: typed content
//! plus the document-level metadata used for cataloguing and search.

use super::parser::{WitsmlDocument, WitsmlParser};
use super::xml::XmlElement;
use super::WitsmlError;
use crate::models::{
    CurveInfo, DataType, GeologicalInterval, Keyed, LogData, LogInfo, LogMetadata, MessageInfo,
    MessageMetadata, MudLogInfo, MudLogMetadata, ProcessedData, WellInfo, WellMetadata,
    WellboreInfo, WellboreMetadata, WitsmlContent, WitsmlMetadata,
};
use chrono::{DateTime, Utc};

const UNKNOWN: &str = "unknown";

/// Processes WITSML documents into [`ProcessedData`].
///
/// # Example
///
/// ```
/// use shared::models::DataType;
/// use shared::witsml::WitsmlProcessor;
///
/// let xml = r#"<wells version="1.4.1.1">
///     <well uid="w-1"><name>Alpha</name><field>North</field></well>
/// </wells>"#;
///
/// let processed = WitsmlProcessor::new().process_file(xml).unwrap();
/// assert_eq!(processed.data_type, DataType::Well);
/// assert_eq!(processed.metadata.well_name.as_deref(), Some("Alpha"));
/// assert_eq!(processed.metadata.field.as_deref(), Some("North"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WitsmlProcessor {
    parser: WitsmlParser,
}

impl WitsmlProcessor {
    /// Creates a new processor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: WitsmlParser::new(),
        }
    }

    /// Returns the parser used by this processor.
    #[must_use]
    pub fn parser(&self) -> &WitsmlParser {
        &self.parser
    }

    /// Parses and processes raw WITSML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not well-formed XML.
    pub fn process_file(&self, content: &str) -> Result<ProcessedData, WitsmlError> {
        let document = self.parser.parse_xml(content)?;
        Ok(self.process_document(&document))
    }

    /// Processes an already parsed document.
    #[must_use]
    pub fn process_document(&self, document: &WitsmlDocument) -> ProcessedData {
        let content = match document.data_type {
            DataType::Well => WitsmlContent {
                wells: Some(keyed(document.objects().map(well_info))),
                ..WitsmlContent::default()
            },
            DataType::Wellbore => WitsmlContent {
                wellbores: Some(keyed(document.objects().map(wellbore_info))),
                ..WitsmlContent::default()
            },
            DataType::Log => WitsmlContent {
                logs: Some(keyed(document.objects().map(log_info))),
                ..WitsmlContent::default()
            },
            DataType::Messages => WitsmlContent {
                messages: Some(document.objects().map(message_info).collect()),
                ..WitsmlContent::default()
            },
            DataType::MudLog => WitsmlContent {
                mud_logs: Some(keyed(document.objects().map(mud_log_info))),
                ..WitsmlContent::default()
            },
            DataType::Unknown => WitsmlContent::default(),
        };

        let metadata = extract_metadata(document, &content);

        ProcessedData {
            data_type: document.data_type,
            metadata,
            content,
            processed_at: Utc::now(),
        }
    }

    /// Determines the well a document describes.
    ///
    /// Uses the first well's `name` for well documents and the first object's
    /// `nameWell` otherwise.
    #[must_use]
    pub fn well_name(&self, document: &WitsmlDocument) -> Option<String> {
        let first = document.objects().next()?;
        let name = match document.data_type {
            DataType::Well => first.child_text("name"),
            _ => first.child_text("nameWell"),
        };
        name.map(str::to_string)
    }
}

/// Collects objects by uid; a repeated uid replaces the earlier entry in place.
fn keyed<T: Keyed>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for item in items {
        match out.iter_mut().find(|existing| existing.uid() == item.uid()) {
            Some(existing) => *existing = item,
            None => out.push(item),
        }
    }
    out
}

fn text(element: &XmlElement, name: &str) -> Option<String> {
    element.child_text(name).map(str::to_string)
}

fn uid(element: &XmlElement) -> String {
    element.attr("uid").unwrap_or(UNKNOWN).to_string()
}

fn parent_uid(element: &XmlElement, attr: &str) -> Option<String> {
    element
        .attr(attr)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn well_info(element: &XmlElement) -> WellInfo {
    WellInfo {
        uid: uid(element),
        metadata: WellMetadata {
            name: text(element, "name").unwrap_or_else(|| "Unnamed Well".to_string()),
            field: text(element, "field"),
            country: text(element, "country"),
            operator: text(element, "operator"),
            time_zone: text(element, "timeZone"),
        },
    }
}

fn wellbore_info(element: &XmlElement) -> WellboreInfo {
    WellboreInfo {
        uid: uid(element),
        metadata: WellboreMetadata {
            name: text(element, "name").unwrap_or_else(|| "Unnamed Wellbore".to_string()),
            number: text(element, "number"),
            well_uid: parent_uid(element, "uidWell").unwrap_or_else(|| UNKNOWN.to_string()),
        },
    }
}

fn log_info(element: &XmlElement) -> LogInfo {
    let index_curve = element.child_text("indexCurve");

    let mut curves: Vec<CurveInfo> = element
        .children_named("logCurveInfo")
        .map(|curve| {
            let mnemonic = text(curve, "mnemonic").unwrap_or_default();
            CurveInfo {
                index: index_curve.map(|ic| ic == mnemonic),
                unit: text(curve, "unit"),
                description: text(curve, "curveDescription"),
                mnemonic,
            }
        })
        .collect();

    let log_data = element.child("logData");

    // Headerless logs still describe their columns in the data block.
    if curves.is_empty() {
        if let Some(mnemonics) = log_data.and_then(|d| d.child_text("mnemonicList")) {
            let units: Vec<&str> = log_data
                .and_then(|d| d.child_text("unitList"))
                .map(|u| u.split(',').map(str::trim).collect())
                .unwrap_or_default();
            curves = mnemonics
                .split(',')
                .map(str::trim)
                .enumerate()
                .map(|(i, mnemonic)| CurveInfo {
                    mnemonic: mnemonic.to_string(),
                    unit: units
                        .get(i)
                        .filter(|u| !u.is_empty())
                        .map(|u| (*u).to_string()),
                    description: None,
                    index: index_curve.map(|ic| ic == mnemonic),
                })
                .collect();
        }
    }

    let rows: Vec<Vec<String>> = log_data
        .map(|d| {
            d.children_named("data")
                .filter(|row| !row.text.is_empty())
                .map(|row| row.text.split(',').map(|v| v.trim().to_string()).collect())
                .collect()
        })
        .unwrap_or_default();

    LogInfo {
        uid: uid(element),
        metadata: LogMetadata {
            name: text(element, "name").unwrap_or_else(|| "Unnamed Log".to_string()),
            well_uid: parent_uid(element, "uidWell").unwrap_or_else(|| UNKNOWN.to_string()),
            wellbore_uid: parent_uid(element, "uidWellbore")
                .unwrap_or_else(|| UNKNOWN.to_string()),
            index_type: text(element, "indexType"),
            start_index: text(element, "startIndex")
                .or_else(|| text(element, "startDateTimeIndex")),
            end_index: text(element, "endIndex").or_else(|| text(element, "endDateTimeIndex")),
        },
        curves,
        data: (!rows.is_empty()).then_some(LogData { values: rows }),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn message_info(element: &XmlElement) -> MessageInfo {
    MessageInfo {
        uid: uid(element),
        metadata: MessageMetadata {
            well_uid: parent_uid(element, "uidWell"),
            wellbore_uid: parent_uid(element, "uidWellbore"),
            source: element
                .path_text("commonData/sourceName")
                .map(str::to_string),
            message_type: text(element, "typeMessage"),
        },
        text: text(element, "messageText").unwrap_or_default(),
        timestamp: element.child_text("dTim").and_then(parse_timestamp),
    }
}

fn depth(element: &XmlElement, name: &str) -> f64 {
    element
        .child_text(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0.0)
}

fn geological_interval(element: &XmlElement) -> GeologicalInterval {
    let lithology = element.child("lithology").and_then(|lith| {
        lith.child_text("type")
            .or_else(|| lith.child_text("description"))
            .or(Some(lith.text.as_str()).filter(|t| !t.is_empty()))
            .map(str::to_string)
    });

    GeologicalInterval {
        top: depth(element, "mdTop"),
        base: depth(element, "mdBottom"),
        lithology,
        description: text(element, "description"),
    }
}

fn mud_log_info(element: &XmlElement) -> MudLogInfo {
    let direct = element.children_named("geologyInterval");
    let nested = element
        .children_named("geologicalIntervalSet")
        .flat_map(|set| set.children_named("geologicalInterval"));

    MudLogInfo {
        uid: uid(element),
        metadata: MudLogMetadata {
            name: text(element, "name").unwrap_or_else(|| "Unnamed Mud Log".to_string()),
            well_uid: parent_uid(element, "uidWell").unwrap_or_else(|| UNKNOWN.to_string()),
            wellbore_uid: parent_uid(element, "uidWellbore")
                .unwrap_or_else(|| UNKNOWN.to_string()),
        },
        intervals: direct.chain(nested).map(geological_interval).collect(),
    }
}

fn extract_metadata(document: &WitsmlDocument, content: &WitsmlContent) -> WitsmlMetadata {
    let mut metadata = WitsmlMetadata {
        data_type: document.data_type,
        version: document.version().unwrap_or(UNKNOWN).to_string(),
        well_name: WitsmlProcessor::new().well_name(document),
        ..WitsmlMetadata::default()
    };

    let first = document.objects().next();
    metadata.well_uid = first.and_then(|o| parent_uid(o, "uidWell"));
    metadata.wellbore_uid = first.and_then(|o| parent_uid(o, "uidWellbore"));

    match document.data_type {
        DataType::Messages => {
            metadata.count = content
                .messages
                .as_ref()
                .map(Vec::len)
                .filter(|count| *count > 0);
        }
        DataType::Well => {
            if let Some(well) = content.wells.as_ref().and_then(|w| w.first()) {
                metadata.field.clone_from(&well.metadata.field);
                metadata.well_uid = Some(well.uid.clone());
            }
        }
        DataType::Wellbore => {
            if let Some(wellbore) = content.wellbores.as_ref().and_then(|w| w.first()) {
                metadata.wellbore_uid = Some(wellbore.uid.clone());
            }
        }
        DataType::Log => {
            if let Some(log) = content.first_log() {
                metadata.log_name = Some(log.metadata.name.clone());
                metadata.index_type.clone_from(&log.metadata.index_type);
            }
        }
        DataType::MudLog | DataType::Unknown => {}
    }

    metadata
}
