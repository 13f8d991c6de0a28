//! WITSML document parser.

use super::xml::{parse_document, XmlElement};
use super::WitsmlError;
use crate::models::DataType;

/// A parsed WITSML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WitsmlDocument {
    /// Data type derived from the root element.
    pub data_type: DataType,
    /// Root element of the document.
    pub root: XmlElement,
}

impl WitsmlDocument {
    /// Returns the WITSML schema version declared on the root element.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.root.attr("version").filter(|v| !v.is_empty())
    }

    /// Iterates over the top-level WITSML objects (`log`, `well`, ...) of the document.
    ///
    /// Documents of unknown type have no objects.
    pub fn objects(&self) -> impl Iterator<Item = &XmlElement> {
        let name = self.data_type.object_element();
        self.root
            .children
            .iter()
            .filter(move |child| name.is_some_and(|n| child.name == n))
    }
}

/// Parses WITSML XML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct WitsmlParser;

impl WitsmlParser {
    /// Creates a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parses WITSML XML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not well-formed XML.
    pub fn parse_xml(&self, content: &str) -> Result<WitsmlDocument, WitsmlError> {
        let root = parse_document(content.trim_start_matches('\u{feff}'))?;
        let data_type = DataType::from_root_element(&root.name);

        tracing::trace!(
            root = %root.name,
            data_type = %data_type,
            elements = root.element_count(),
            "Parsed WITSML document"
        );

        Ok(WitsmlDocument { data_type, root })
    }
}
