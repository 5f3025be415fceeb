//! match-crawler - football match listing crawler
//!
//! Drives a headless browser over a sports-streaming site and extracts a
//! deduplicated list of matches (teams, kick-off time, status, link) plus the
//! stream sources of individual match pages.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export the types most callers need
pub use domain::{ExtractionStats, MatchDetail, MatchList, MatchRecord, MatchStatus};
pub use infrastructure::{CrawlError, CrawlerConfig, MatchCrawler};
