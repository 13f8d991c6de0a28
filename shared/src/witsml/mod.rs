//! WITSML parsing and processing.
//!
//! - [`xml`] turns raw XML into a namespace-free element tree
//! - [`parser`] classifies a document by its root element
//! - [`processor`] extracts typed wells, wellbores, logs, messages and mud logs

pub mod parser;
pub mod processor;
pub mod xml;

pub use parser::{WitsmlDocument, WitsmlParser};
pub use processor::WitsmlProcessor;
pub use xml::{parse_document, XmlElement};

use thiserror::Error;

/// Errors that can occur while parsing a WITSML document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WitsmlError {
    /// The document is not well-formed XML.
    #[error("Malformed XML: {0}")]
    Syntax(String),

    /// The document ended while an element was still open.
    #[error("Unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    /// The document contains no root element.
    #[error("Document has no root element")]
    MissingRoot,
}
