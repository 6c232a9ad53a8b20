//! Hacker News search engine implementation
//!
//! Uses the Algolia-hosted HN search API, restricted to stories.

use super::traits::*;
use crate::results::{strip_tags, Source, SourceItem};
use async_trait::async_trait;

const HITS_PER_PAGE: u32 = 5;
const STORY_TITLE: &str = "Hacker News story";

/// Hacker News story search engine
pub struct HackerNews {
    api_url: String,
    item_url: String,
}

impl HackerNews {
    pub fn new() -> Self {
        Self::with_base_url("https://hn.algolia.com")
    }

    /// Point the engine at another host (tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_url: format!("{}/api/v1/search", base_url.into().trim_end_matches('/')),
            item_url: "https://news.ycombinator.com/item?id=".to_string(),
        }
    }

    fn hit_to_item(&self, hit: &serde_json::Value) -> SourceItem {
        let title = hit
            .get("title")
            .and_then(|t| t.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or(STORY_TITLE);

        // Ask HN and similar posts have no external link
        let url = match hit.get("url").and_then(|u| u.as_str()).filter(|u| !u.is_empty()) {
            Some(url) => url.to_string(),
            None => format!("{}{}", self.item_url, object_id(hit)),
        };

        let snippet = hit
            .get("_highlightResult")
            .and_then(|h| h.get("title"))
            .and_then(|t| t.get("value"))
            .and_then(|v| v.as_str())
            .map(strip_tags);

        SourceItem::new(title, url, self.source()).with_optional_snippet(snippet)
    }
}

/// `objectID` is normally a string, but tolerate numeric ids
fn object_id(hit: &serde_json::Value) -> String {
    match hit.get("objectID") {
        Some(serde_json::Value::String(id)) => id.clone(),
        Some(serde_json::Value::Number(id)) => id.to_string(),
        _ => "undefined".to_string(),
    }
}

impl Default for HackerNews {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for HackerNews {
    fn name(&self) -> &str {
        "hackernews"
    }

    fn source(&self) -> Source {
        Source::News
    }

    fn about(&self) -> EngineAbout {
        EngineAbout::new()
            .website("https://news.ycombinator.com")
            .official_api(true)
    }

    fn request(&self, query: &str) -> EngineRequest {
        EngineRequest::get(&self.api_url)
            .param("query", query)
            .param("tags", "story")
            .param("hitsPerPage", HITS_PER_PAGE.to_string())
    }

    fn response(&self, response: EngineResponse) -> Result<Vec<SourceItem>, EngineError> {
        let json: serde_json::Value = response.error_for_status()?.json()?;

        let items = json
            .get("hits")
            .and_then(|h| h.as_array())
            .map(|hits| hits.iter().map(|hit| self.hit_to_item(hit)).collect())
            .unwrap_or_default();

        Ok(items)
    }
}
