//! Engine traits and types

use crate::network::HttpClient;
use crate::results::{Source, SourceItem};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

/// Why an engine produced no items
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Upstream answered with a non-success status
    #[error("HTTP error: {0}")]
    Http(u16),

    /// The request never produced a response
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The body was not the JSON shape we expected
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// HTTP GET request to be made by the engine
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// URL to request
    pub url: String,
    /// Query parameters, in the order they are sent
    pub params: Vec<(String, String)>,
}

impl EngineRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
        }
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Look up a query parameter by name
    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP response from engine request
#[derive(Debug)]
pub struct EngineResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl EngineResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, EngineError> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into an error
    pub fn error_for_status(self) -> Result<Self, EngineError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(EngineError::Http(self.status))
        }
    }
}

/// Main trait that every source implements
#[async_trait]
pub trait Engine: Send + Sync {
    /// Engine name
    fn name(&self) -> &str;

    /// Tag attached to every item this engine emits
    fn source(&self) -> Source;

    /// Short description of the engine
    fn about(&self) -> EngineAbout {
        EngineAbout::default()
    }

    /// Build the primary HTTP request for a search
    fn request(&self, query: &str) -> EngineRequest;

    /// Parse the primary HTTP response into items
    fn response(&self, response: EngineResponse) -> Result<Vec<SourceItem>, EngineError>;

    /// Run the search against the upstream.
    ///
    /// Engines that need more than one round-trip override this.
    async fn search(
        &self,
        client: &HttpClient,
        query: &str,
    ) -> Result<Vec<SourceItem>, EngineError> {
        let response = client.execute(self.request(query)).await?;
        self.response(response)
    }

    /// Run the search and absorb any failure into an empty list
    async fn fetch(&self, client: &HttpClient, query: &str) -> Vec<SourceItem> {
        match self.search(client, query).await {
            Ok(items) => {
                debug!("Engine {} returned {} items", self.name(), items.len());
                items
            }
            Err(e) => {
                warn!("Engine {} failed: {}", self.name(), e);
                Vec::new()
            }
        }
    }
}

/// Engine metadata
#[derive(Debug, Clone, Default, Serialize)]
pub struct EngineAbout {
    /// Website URL
    pub website: Option<String>,
    /// Whether it uses the official API
    pub use_official_api: bool,
}

impl EngineAbout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn website(mut self, url: impl Into<String>) -> Self {
        self.website = Some(url.into());
        self
    }

    pub fn official_api(mut self, uses: bool) -> Self {
        self.use_official_api = uses;
        self
    }
}
