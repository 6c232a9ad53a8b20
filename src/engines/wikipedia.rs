//! Wikipedia search engine implementation
//!
//! Two-stage lookup: the MediaWiki search API finds matching titles, then the
//! REST summary endpoint is queried for every title concurrently to get a
//! long-form extract.

use super::traits::*;
use crate::results::{strip_tags, Source, SourceItem};
use async_trait::async_trait;
use futures::future::join_all;
use tracing::debug;

use crate::network::HttpClient;

/// Maximum number of titles requested from the search API
const SEARCH_LIMIT: usize = 5;

/// Wikipedia search engine
pub struct Wikipedia {
    base_url: String,
}

/// One hit from the search API
#[derive(Debug, Clone, PartialEq)]
struct SearchHit {
    title: String,
    snippet: Option<String>,
}

impl Wikipedia {
    pub fn new() -> Self {
        Self::with_base_url("https://en.wikipedia.org")
    }

    /// Point the engine at another host (mirrors, tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn article_url(&self, title: &str) -> String {
        format!("{}/wiki/{}", self.base_url, encode_title(title))
    }

    fn summary_url(&self, title: &str) -> String {
        format!(
            "{}/api/rest_v1/page/summary/{}",
            self.base_url,
            encode_title(title)
        )
    }

    fn parse_hits(&self, response: EngineResponse) -> Result<Vec<SearchHit>, EngineError> {
        let json: serde_json::Value = response.error_for_status()?.json()?;

        let hits = json
            .get("query")
            .and_then(|q| q.get("search"))
            .and_then(|s| s.as_array())
            .map(|pages| {
                pages
                    .iter()
                    .filter_map(|page| {
                        let title = page.get("title").and_then(|t| t.as_str())?;
                        let snippet = page
                            .get("snippet")
                            .and_then(|s| s.as_str())
                            .filter(|s| !s.is_empty())
                            .map(strip_tags);
                        Some(SearchHit {
                            title: title.to_string(),
                            snippet,
                        })
                    })
                    .take(SEARCH_LIMIT)
                    .collect()
            })
            .unwrap_or_default();

        Ok(hits)
    }

    /// Fetch the long-form extract for one page.
    ///
    /// A non-success status means "no extract"; a transport or decode
    /// failure is an error for the whole engine.
    async fn summary(&self, client: &HttpClient, title: &str) -> Result<Option<String>, EngineError> {
        let response = client.get(&self.summary_url(title)).await?;
        if !response.is_success() {
            debug!("No summary for '{}' (HTTP {})", title, response.status);
            return Ok(None);
        }

        let json: serde_json::Value = response.json()?;
        Ok(json
            .get("extract")
            .and_then(|e| e.as_str())
            .filter(|e| !e.is_empty())
            .map(|e| e.to_string()))
    }

    fn build_item(&self, hit: SearchHit, extract: Option<String>) -> SourceItem {
        let url = self.article_url(&hit.title);
        SourceItem::new(hit.title, url, self.source()).with_optional_snippet(extract.or(hit.snippet))
    }
}

/// Percent-encode a page title as a path segment, leaving the
/// `! ' ( ) *` marks literal the way browsers' `encodeURIComponent` does
fn encode_title(title: &str) -> String {
    urlencoding::encode(title)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

impl Default for Wikipedia {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for Wikipedia {
    fn name(&self) -> &str {
        "wikipedia"
    }

    fn source(&self) -> Source {
        Source::Encyclopedia
    }

    fn about(&self) -> EngineAbout {
        EngineAbout::new()
            .website("https://www.wikipedia.org")
            .official_api(true)
    }

    fn request(&self, query: &str) -> EngineRequest {
        EngineRequest::get(format!("{}/w/api.php", self.base_url))
            .param("action", "query")
            .param("list", "search")
            .param("srsearch", query)
            .param("format", "json")
            .param("srlimit", SEARCH_LIMIT.to_string())
            .param("utf8", "1")
    }

    /// Items from the search API alone, without summary extracts
    fn response(&self, response: EngineResponse) -> Result<Vec<SourceItem>, EngineError> {
        Ok(self
            .parse_hits(response)?
            .into_iter()
            .map(|hit| self.build_item(hit, None))
            .collect())
    }

    async fn search(
        &self,
        client: &HttpClient,
        query: &str,
    ) -> Result<Vec<SourceItem>, EngineError> {
        let response = client.execute(self.request(query)).await?;
        let hits = self.parse_hits(response)?;

        let summaries = join_all(hits.iter().map(|hit| self.summary(client, &hit.title))).await;

        hits.into_iter()
            .zip(summaries)
            .map(|(hit, extract)| extract.map(|extract| self.build_item(hit, extract)))
            .collect()
    }
}
