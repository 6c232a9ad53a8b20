//! Settings structures for trisearch configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
    pub sources: SourceSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (TRISEARCH_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("TRISEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("TRISEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = var("TRISEARCH_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                self.search.timeout_ms = ms;
            }
        }
        if let Some(val) = var("TRISEARCH_USER_AGENT") {
            self.outgoing.user_agent = val;
        }
    }

    /// Check that the settings describe a usable instance
    pub fn validate(&self) -> Result<()> {
        if self.search.timeout_ms == 0 {
            anyhow::bail!("search.timeout_ms must be greater than zero");
        }
        let request_timeout = self.outgoing.request_timeout;
        if !request_timeout.is_finite() || request_timeout <= 0.0 {
            anyhow::bail!(
                "outgoing.request_timeout must be a positive number of seconds, got {}",
                request_timeout
            );
        }
        if self.outgoing.user_agent.trim().is_empty() {
            anyhow::bail!("outgoing.user_agent must not be empty");
        }
        for (name, base) in self.sources.iter() {
            Url::parse(base)
                .map_err(|e| anyhow::anyhow!("invalid base URL for {}: {} ({})", name, base, e))?;
        }
        Ok(())
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Instance name displayed in the UI
    pub instance_name: String,
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            instance_name: "trisearch".to_string(),
            port: 8888,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Aggregation behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Per-source budget in milliseconds; a source that has not answered by
    /// then contributes no items
    pub timeout_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            timeout_ms: crate::DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Transport-level request timeout in seconds
    pub request_timeout: f64,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Client identifier sent as User-Agent on every upstream call
    pub user_agent: String,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            pool_maxsize: 20,
            user_agent: format!("trisearch/{}", crate::VERSION),
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Upstream base URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub wikipedia_api: String,
    pub duckduckgo_api: String,
    pub hackernews_api: String,
}

impl SourceSettings {
    fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("wikipedia", self.wikipedia_api.as_str()),
            ("duckduckgo", self.duckduckgo_api.as_str()),
            ("hackernews", self.hackernews_api.as_str()),
        ]
        .into_iter()
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            wikipedia_api: "https://en.wikipedia.org".to_string(),
            duckduckgo_api: "https://api.duckduckgo.com".to_string(),
            hackernews_api: "https://hn.algolia.com".to_string(),
        }
    }
}
