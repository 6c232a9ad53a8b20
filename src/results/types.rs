//! Result type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Provenance of a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Encyclopedia,
    InstantAnswer,
    News,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Encyclopedia => "encyclopedia",
            Source::InstantAnswer => "instant_answer",
            Source::News => "news",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single normalized search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    /// Display text
    pub title: String,
    /// Canonical link, also the de-duplication key
    pub url: String,
    /// Short plain-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Which source produced this item
    pub source: Source,
}

impl SourceItem {
    /// Create a new item without a snippet
    pub fn new(title: impl Into<String>, url: impl Into<String>, source: Source) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: None,
            source,
        }
    }

    /// Attach a snippet
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    /// Attach a snippet if one is present
    pub fn with_optional_snippet(mut self, snippet: Option<String>) -> Self {
        self.snippet = snippet;
        self
    }
}

/// Aggregated answer for one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The trimmed query
    pub query: String,
    /// Merged, de-duplicated items
    pub items: Vec<SourceItem>,
    /// Wall-clock milliseconds spent aggregating
    #[serde(rename = "tookMs")]
    pub took_ms: u64,
}

impl SearchResponse {
    /// Response for a blank query
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            items: Vec::new(),
            took_ms: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
