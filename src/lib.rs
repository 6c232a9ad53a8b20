//! trisearch: a small metasearch aggregator
//!
//! Queries Wikipedia, the DuckDuckGo Instant Answer API and Hacker News in
//! parallel, normalizes their answers into one item shape, and merges them
//! into a single de-duplicated list.

pub mod config;
pub mod engines;
pub mod network;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use engines::Engine;
pub use results::{SearchResponse, Source, SourceItem};
pub use search::Search;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default per-engine timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
