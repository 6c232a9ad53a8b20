//! Result types and container for search results
//!
//! This module defines the item shape every source is normalized into, and
//! the merge step that turns per-source lists into one response.

mod container;
mod html;
mod types;

pub use container::ResultContainer;
pub use html::strip_tags;
pub use types::*;
