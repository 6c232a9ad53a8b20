//! Merging per-source result lists into one de-duplicated list

use super::types::SourceItem;
use std::collections::HashSet;

/// Collects per-source batches in priority order and merges them
#[derive(Debug, Default)]
pub struct ResultContainer {
    batches: Vec<Vec<SourceItem>>,
}

impl ResultContainer {
    /// Create a new empty result container
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the items of the next source in priority order
    pub fn push_batch(&mut self, items: Vec<SourceItem>) {
        self.batches.push(items);
    }

    /// Total items across batches, before de-duplication
    pub fn raw_count(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    /// Concatenate batches and keep the first item seen for each URL
    pub fn into_ordered_results(self) -> Vec<SourceItem> {
        let mut seen = HashSet::new();
        self.batches
            .into_iter()
            .flatten()
            .filter(|item| seen.insert(item.url.clone()))
            .collect()
    }
}
