//! Minimal XML element tree for WITSML documents.
//!
//! WITSML payloads are small, deeply nested and schema-regular, so the parser
//! materialises the whole document as an [`XmlElement`] tree and the processor
//! walks it. Namespace prefixes are stripped from element and attribute names
//! because fixtures mix `witsml:`-prefixed and default-namespace documents.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;

use super::WitsmlError;

/// A single XML element with namespace-free names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Local element name (prefix removed).
    pub name: String,
    /// Attributes keyed by local name.
    pub attributes: BTreeMap<String, String>,
    /// Trimmed text content. Empty when the element has no text.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Creates an empty element with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns an attribute value by local name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns the first direct child with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Iterates over all direct children with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Returns the non-empty text of the first direct child with the given name.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .map(|c| c.text.as_str())
            .filter(|t| !t.is_empty())
    }

    /// Follows a `/`-separated path of direct children and returns its text.
    #[must_use]
    pub fn path_text(&self, path: &str) -> Option<&str> {
        let mut current = self;
        for segment in path.split('/') {
            current = current.child(segment)?;
        }
        Some(current.text.as_str()).filter(|t| !t.is_empty())
    }

    /// Counts every element in this subtree (including itself).
    #[must_use]
    pub fn element_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(XmlElement::element_count)
            .sum::<usize>()
    }
}

/// Strips a namespace prefix (`witsml:log` -> `log`).
fn local(name: &[u8]) -> String {
    let name = String::from_utf8_lossy(name);
    name.split_once(':')
        .map_or_else(|| name.to_string(), |(_, local)| local.to_string())
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement, WitsmlError> {
    let mut element = XmlElement::new(local(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(|e| WitsmlError::Syntax(e.to_string()))?;
        let key = attr.key.as_ref();
        // Namespace declarations carry no WITSML data.
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        let value = attr
            .unescape_value()
            .map_err(|e| WitsmlError::Syntax(e.to_string()))?;
        element
            .attributes
            .insert(local(key), value.trim().to_string());
    }
    Ok(element)
}

fn append_text(element: &mut XmlElement, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !element.text.is_empty() {
        element.text.push(' ');
    }
    element.text.push_str(text);
}

/// Parses an XML document into its root element.
///
/// # Errors
///
/// Returns an error if the document is not well-formed, is truncated, or
/// contains no root element.
pub fn parse_document(content: &str) -> Result<XmlElement, WitsmlError> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            WitsmlError::Syntax(format!("{e} at byte {}", reader.buffer_position()))
        })?;

        match event {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(WitsmlError::Syntax(
                        "content after the root element".to_string(),
                    ));
                }
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None if root.is_none() => root = Some(element),
                    None => {
                        return Err(WitsmlError::Syntax(
                            "content after the root element".to_string(),
                        ))
                    }
                }
            }
            Event::End(_) => {
                let Some(element) = stack.pop() else {
                    return Err(WitsmlError::Syntax("unbalanced end tag".to_string()));
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| WitsmlError::Syntax(e.to_string()))?;
                match stack.last_mut() {
                    Some(current) => append_text(current, &text),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(WitsmlError::Syntax(
                            "text outside of the root element".to_string(),
                        ))
                    }
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    append_text(current, &String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctypes.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(WitsmlError::UnexpectedEof(open.name.clone()));
    }
    root.ok_or(WitsmlError::MissingRoot)
}
