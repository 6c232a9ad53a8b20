//! Engine registry holding the sources in priority order

use super::duckduckgo::DuckDuckGoInstant;
use super::hackernews::HackerNews;
use super::traits::Engine;
use super::wikipedia::Wikipedia;
use crate::config::SourceSettings;
use std::sync::Arc;
use tracing::info;

/// Ordered list of engines; the order is the merge priority
#[derive(Clone, Default)]
pub struct EngineRegistry {
    engines: Vec<Arc<dyn Engine>>,
}

impl EngineRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The three standard sources: encyclopedia, instant answer, news
    pub fn from_settings(sources: &SourceSettings) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(Wikipedia::with_base_url(&sources.wikipedia_api)));
        registry.register(Arc::new(DuckDuckGoInstant::with_base_url(
            &sources.duckduckgo_api,
        )));
        registry.register(Arc::new(HackerNews::with_base_url(&sources.hackernews_api)));
        info!("Loaded {} engines", registry.len());
        registry
    }

    /// Append an engine after every engine registered so far
    pub fn register(&mut self, engine: Arc<dyn Engine>) {
        self.engines.push(engine);
    }

    /// Engines in priority order
    pub fn engines(&self) -> &[Arc<dyn Engine>] {
        &self.engines
    }

    /// Engine names in priority order
    pub fn names(&self) -> Vec<&str> {
        self.engines.iter().map(|e| e.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}
