//! Infrastructure layer for the browser, DOM extraction, and persistence
//!
//! This module provides the headless browser session, the parsers that turn
//! rendered pages into match records, configuration, logging, and JSON output.

pub mod browser; // Headless Chrome session
pub mod config; // Configuration loading and defaults
pub mod crawl_error; // Fatal crawl errors
pub mod json_store; // JSON output files
pub mod logging; // Logging infrastructure
pub mod match_crawler; // List and detail crawl orchestration
pub mod parsing; // DOM extraction
pub mod parsing_error; // Parsing error types

// Re-export commonly used items
pub use browser::{BrowserSession, PageSource};
pub use config::{BrowserConfig, CrawlerConfig, LoggingConfig, OutputConfig, load_config};
pub use crawl_error::{CrawlError, CrawlResult};
pub use logging::{get_log_directory, init_logging_with_config};
pub use match_crawler::{MatchCrawler, RenderedPage};
pub use parsing::{
    DomAccessor, HtmlDom, MatchDetailParser, MatchListParser, ParsingConfig, ParsingError,
    ParsingResult,
};
