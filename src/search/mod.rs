//! Search module
//!
//! Coordinates fanning a query out to every engine and merging the answers.

mod executor;

pub use executor::Search;
