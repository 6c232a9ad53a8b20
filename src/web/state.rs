//! Application state shared across handlers

use crate::config::Settings;
use crate::engines::EngineRegistry;
use crate::network::HttpClient;
use crate::search::Search;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Engine registry
    pub registry: Arc<EngineRegistry>,
    /// Search executor
    pub search: Arc<Search>,
    /// Template renderer
    pub templates: Arc<super::Templates>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        settings: Settings,
        registry: EngineRegistry,
        client: HttpClient,
    ) -> anyhow::Result<Self> {
        let registry = Arc::new(registry);
        let search = Search::new(client, registry.clone())
            .with_timeout(Duration::from_millis(settings.search.timeout_ms));
        let templates = Arc::new(super::Templates::new()?);

        Ok(Self {
            settings: Arc::new(settings),
            registry,
            search: Arc::new(search),
            templates,
        })
    }

    /// Build everything from settings alone
    pub fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        let client = HttpClient::with_settings(&settings.outgoing)?;
        let registry = EngineRegistry::from_settings(&settings.sources);
        Self::new(settings, registry, client)
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.server.instance_name
    }
}
