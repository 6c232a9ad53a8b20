//! Search execution and orchestration

use crate::engines::{Engine, EngineRegistry};
use crate::network::HttpClient;
use crate::results::{ResultContainer, SearchResponse, SourceItem};
use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// Search executor that fans a query out to every engine and merges the results
pub struct Search {
    /// HTTP client for making requests
    client: HttpClient,
    /// Engines in merge priority order
    registry: Arc<EngineRegistry>,
    /// Budget for each engine
    timeout: Duration,
}

impl Search {
    /// Create a new search executor
    pub fn new(client: HttpClient, registry: Arc<EngineRegistry>) -> Self {
        Self {
            client,
            registry,
            timeout: Duration::from_millis(crate::DEFAULT_TIMEOUT_MS),
        }
    }

    /// Set the per-engine timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Per-engine timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute a search query across all registered engines.
    ///
    /// Blank queries short-circuit without touching the network. Otherwise
    /// every engine runs as its own task; an engine that fails, panics or
    /// misses its budget contributes nothing. Results are concatenated in
    /// registry order and de-duplicated by URL, first occurrence winning.
    pub async fn execute(&self, raw_query: &str) -> SearchResponse {
        let query = raw_query.trim();
        if query.is_empty() {
            return SearchResponse::empty(query);
        }

        let start = Instant::now();

        info!(
            "Executing search '{}' on {} engines",
            query,
            self.registry.len()
        );

        let branches: Vec<_> = self
            .registry
            .engines()
            .iter()
            .map(|engine| self.spawn_branch(Arc::clone(engine), query))
            .collect();
        let batches = join_all(branches).await;

        let mut container = ResultContainer::new();
        for batch in batches {
            container.push_batch(batch);
        }
        let raw_count = container.raw_count();
        let items = container.into_ordered_results();

        let took_ms = start.elapsed().as_millis() as u64;
        debug!(
            "Merged {} items into {} for '{}' in {} ms",
            raw_count,
            items.len(),
            query,
            took_ms
        );

        SearchResponse {
            query: query.to_string(),
            items,
            took_ms,
        }
    }

    /// Start one engine on its own task and race it against the budget.
    ///
    /// The task is spawned immediately. On timeout the join handle is
    /// dropped, which detaches the task: it keeps running and its result is
    /// discarded.
    fn spawn_branch(
        &self,
        engine: Arc<dyn Engine>,
        query: &str,
    ) -> impl Future<Output = Vec<SourceItem>> {
        let name = engine.name().to_string();
        let budget = self.timeout;
        let client = self.client.clone();
        let query = query.to_string();

        let handle = tokio::spawn(async move { engine.fetch(&client, &query).await });

        async move {
            match timeout(budget, handle).await {
                Ok(Ok(items)) => items,
                Ok(Err(e)) => {
                    error!("Engine {} task failed: {}", name, e);
                    Vec::new()
                }
                Err(_) => {
                    warn!("Timeout for engine {} after {:?}", name, budget);
                    Vec::new()
                }
            }
        }
    }
}
