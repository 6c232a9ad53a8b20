//! DuckDuckGo Instant Answer engine implementation

use super::traits::*;
use crate::results::{Source, SourceItem};
use async_trait::async_trait;

/// Number of related topics inspected after the abstract
const RELATED_TOPICS_LIMIT: usize = 4;

const ABSTRACT_TITLE: &str = "DuckDuckGo Instant Answer";
const RELATED_TITLE: &str = "Related";

/// DuckDuckGo Instant Answer API (abstract plus related topics)
pub struct DuckDuckGoInstant {
    api_url: String,
}

impl DuckDuckGoInstant {
    pub fn new() -> Self {
        Self::with_base_url("https://api.duckduckgo.com")
    }

    /// Point the engine at another host (tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_url: format!("{}/", base_url.into().trim_end_matches('/')),
        }
    }
}

impl Default for DuckDuckGoInstant {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty_str<'a>(json: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    json.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

#[async_trait]
impl Engine for DuckDuckGoInstant {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    fn source(&self) -> Source {
        Source::InstantAnswer
    }

    fn about(&self) -> EngineAbout {
        EngineAbout::new()
            .website("https://duckduckgo.com")
            .official_api(true)
    }

    fn request(&self, query: &str) -> EngineRequest {
        EngineRequest::get(&self.api_url)
            .param("q", query)
            .param("format", "json")
            .param("no_redirect", "1")
            .param("no_html", "1")
    }

    fn response(&self, response: EngineResponse) -> Result<Vec<SourceItem>, EngineError> {
        let json: serde_json::Value = response.error_for_status()?.json()?;
        let mut items = Vec::new();

        // Abstract (instant answer)
        if let (Some(url), Some(text)) = (
            non_empty_str(&json, "AbstractURL"),
            non_empty_str(&json, "AbstractText"),
        ) {
            let title = non_empty_str(&json, "Heading").unwrap_or(ABSTRACT_TITLE);
            items.push(SourceItem::new(title, url, self.source()).with_snippet(text));
        }

        // Topic groups carry no FirstURL; they are skipped but still use up a slot
        if let Some(related) = json.get("RelatedTopics").and_then(|v| v.as_array()) {
            for topic in related.iter().take(RELATED_TOPICS_LIMIT) {
                if let (Some(url), Some(text)) = (
                    non_empty_str(topic, "FirstURL"),
                    non_empty_str(topic, "Text"),
                ) {
                    let title = text
                        .split(" - ")
                        .next()
                        .filter(|t| !t.is_empty())
                        .unwrap_or(RELATED_TITLE);
                    items.push(SourceItem::new(title, url, self.source()).with_snippet(text));
                }
            }
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::HttpClient;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ok_response(body: serde_json::Value) -> EngineResponse {
        EngineResponse {
            status: 200,
            text: body.to_string(),
            url: "https://api.duckduckgo.com/".to_string(),
        }
    }

    #[test]
    fn test_duckduckgo_request() {
        let ddg = DuckDuckGoInstant::new();
        let request = ddg.request("rust programming");

        assert_eq!(request.url, "https://api.duckduckgo.com/");
        assert_eq!(request.get_param("q"), Some("rust programming"));
        assert_eq!(request.get_param("format"), Some("json"));
        assert_eq!(request.get_param("no_html"), Some("1"));
    }

    #[test]
    fn test_abstract_and_related_topics() {
        let ddg = DuckDuckGoInstant::new();
        let body = json!({
            "Heading": "Rust",
            "AbstractURL": "https://en.wikipedia.org/wiki/Rust_(programming_language)",
            "AbstractText": "Rust is a multi-paradigm language.",
            "RelatedTopics": [
                { "FirstURL": "https://duckduckgo.com/Cargo", "Text": "Cargo - The Rust package manager" },
                { "Name": "Group", "Topics": [] },
                { "FirstURL": "https://duckduckgo.com/Ferris", "Text": " - mascot" },
                { "FirstURL": "https://duckduckgo.com/NoText" },
                { "FirstURL": "https://duckduckgo.com/Fifth", "Text": "Fifth - beyond the limit" }
            ]
        });

        let items = ddg.response(ok_response(body)).unwrap();
        assert_eq!(items.len(), 3);

        assert_eq!(items[0].title, "Rust");
        assert_eq!(items[0].snippet.as_deref(), Some("Rust is a multi-paradigm language."));
        assert_eq!(items[0].source, Source::InstantAnswer);

        assert_eq!(items[1].title, "Cargo");
        assert_eq!(items[1].url, "https://duckduckgo.com/Cargo");
        assert_eq!(items[1].snippet.as_deref(), Some("Cargo - The Rust package manager"));

        assert_eq!(items[2].title, RELATED_TITLE);
        assert_eq!(items[2].snippet.as_deref(), Some(" - mascot"));
    }

    #[test]
    fn test_abstract_without_heading() {
        let ddg = DuckDuckGoInstant::new();
        let body = json!({
            "Heading": "",
            "AbstractURL": "https://example.com",
            "AbstractText": "Something"
        });
        let items = ddg.response(ok_response(body)).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, ABSTRACT_TITLE);
    }

    #[test]
    fn test_abstract_needs_url_and_text() {
        let ddg = DuckDuckGoInstant::new();
        let body = json!({
            "Heading": "Rust",
            "AbstractURL": "https://example.com",
            "AbstractText": "",
            "RelatedTopics": []
        });
        assert!(ddg.response(ok_response(body)).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_payload_yields_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "rust"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let ddg = DuckDuckGoInstant::with_base_url(server.uri());
        let client = HttpClient::new().unwrap();

        assert!(matches!(
            ddg.search(&client, "rust").await,
            Err(EngineError::Decode(_))
        ));
        assert!(ddg.fetch(&client, "rust").await.is_empty());
    }
}
