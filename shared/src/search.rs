//! Lexical search over loaded fixtures.
//!
//! Each fixture is flattened into a bag of lowercase terms drawn from its
//! catalog entry and processed content. A query scores a fixture by the
//! fraction of its distinct terms the fixture contains.

use crate::models::{DataType, StoredFile};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use validator::Validate;

/// Default number of results returned by a search.
pub const DEFAULT_MAX_RESULTS: usize = 20;

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

/// Search request.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SearchQuery {
    /// Free-text query.
    #[validate(length(min = 1, message = "Query cannot be empty"))]
    pub query: String,

    /// Optional exact-match filters (`well_name`, `file_type`).
    #[serde(default)]
    pub filters: Option<HashMap<String, String>>,

    /// Maximum number of results to return.
    #[serde(default = "default_max_results")]
    #[validate(range(min = 1, max = 1000))]
    pub max_results: usize,
}

impl SearchQuery {
    /// Creates a query with default options.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            filters: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Adds an exact-match filter.
    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the maximum number of results.
    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    fn accepts(&self, file: &StoredFile) -> bool {
        let Some(filters) = &self.filters else {
            return true;
        };
        filters.iter().all(|(key, value)| match key.as_str() {
            "well_name" => &file.info.well_name == value,
            "file_type" => file.info.file_type.as_str() == value,
            // Unknown filter keys never match.
            _ => false,
        })
    }
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Id of the matching file.
    pub id: String,
    /// Relevance score in `(0, 1]`.
    pub score: f64,
    /// File name.
    pub source: String,
    /// Data type of the file.
    pub content_type: DataType,
    /// Matched terms and a short text excerpt.
    pub content: serde_json::Value,
    /// Catalog metadata of the file.
    pub metadata: serde_json::Value,
}

/// Splits text into lowercase alphanumeric terms.
#[must_use]
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Builds the searchable text of a stored file.
#[must_use]
pub fn document_text(file: &StoredFile) -> String {
    let mut parts: Vec<&str> = vec![
        file.info.name.as_str(),
        file.info.well_name.as_str(),
        file.info.file_type.as_str(),
    ];

    let data = &file.content.data;
    let metadata = &data.metadata;
    parts.extend(
        [
            &metadata.well_name,
            &metadata.field,
            &metadata.log_name,
            &metadata.index_type,
        ]
        .into_iter()
        .flatten()
        .map(String::as_str),
    );

    let content = &data.content;
    for well in content.wells.iter().flatten() {
        parts.push(&well.metadata.name);
        parts.extend(
            [
                &well.metadata.field,
                &well.metadata.country,
                &well.metadata.operator,
            ]
            .into_iter()
            .flatten()
            .map(String::as_str),
        );
    }
    for wellbore in content.wellbores.iter().flatten() {
        parts.push(&wellbore.metadata.name);
    }
    for log in content.logs.iter().flatten() {
        parts.push(&log.metadata.name);
        for curve in &log.curves {
            parts.push(&curve.mnemonic);
            parts.extend(curve.unit.as_deref());
            parts.extend(curve.description.as_deref());
        }
    }
    for message in content.messages.iter().flatten() {
        parts.push(&message.text);
        parts.extend(message.metadata.message_type.as_deref());
        parts.extend(message.metadata.source.as_deref());
    }
    for mud_log in content.mud_logs.iter().flatten() {
        parts.push(&mud_log.metadata.name);
        for interval in &mud_log.intervals {
            parts.extend(interval.lithology.as_deref());
            parts.extend(interval.description.as_deref());
        }
    }

    parts.join(" ")
}

fn excerpt(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Scores `files` against the query and returns the best hits.
///
/// Hits are ordered by score (descending) then file name; files matching no
/// query term are omitted.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn search(files: &[StoredFile], query: &SearchQuery) -> Vec<SearchResult> {
    let terms = tokenize(&query.query);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchResult> = files
        .iter()
        .filter(|file| query.accepts(file))
        .filter_map(|file| {
            let text = document_text(file);
            let document_terms = tokenize(&text);
            let matched: Vec<&String> = terms.intersection(&document_terms).collect();
            if matched.is_empty() {
                return None;
            }

            let score = matched.len() as f64 / terms.len() as f64;
            Some(SearchResult {
                id: file.info.id.clone(),
                score,
                source: file.info.name.clone(),
                content_type: file.info.file_type,
                content: serde_json::json!({
                    "matched_terms": matched,
                    "text": excerpt(&text, 200),
                }),
                metadata: serde_json::json!({
                    "type": file.info.file_type,
                    "well": file.info.well_name,
                    "version": file.content.data.metadata.version,
                }),
            })
        })
        .collect();

    hits.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.source.cmp(&b.source))
    });
    hits.truncate(query.max_results);
    hits
}
