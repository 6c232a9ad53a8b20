//! HTTP networking module
//!
//! Provides the outbound HTTP client used by every engine.

mod client;

pub use client::HttpClient;
