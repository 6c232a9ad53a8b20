//! Search engine module
//!
//! Defines the Engine trait and the three upstream sources.

mod registry;
mod traits;

// Engine implementations
pub mod duckduckgo;
pub mod hackernews;
pub mod wikipedia;

pub use registry::EngineRegistry;
pub use traits::*;
