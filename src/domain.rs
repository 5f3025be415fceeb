//! Domain module - match entities and site constants
//!
//! This module contains the records produced by a crawl and the constants
//! describing the source site. Nothing in here touches the browser or the
//! filesystem.

pub mod constants;
pub mod match_record;

// Re-export commonly used items for convenience
pub use match_record::{ExtractionStats, MatchDetail, MatchList, MatchRecord, MatchStatus};
