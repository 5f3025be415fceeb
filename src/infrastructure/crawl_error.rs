//! Fatal crawl errors
//!
//! Anything in here aborts the crawl. Problems local to one match record are
//! never turned into a `CrawlError`; see `parsing::match_list_parser`.

use std::path::PathBuf;
use thiserror::Error;

use crate::infrastructure::parsing::ParsingError;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Invalid crawler configuration: {reason}")]
    Config { reason: String },

    #[error("Failed to launch browser: {reason}")]
    BrowserLaunch { reason: String },

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Failed to read rendered page {url}: {reason}")]
    Snapshot { url: String, reason: String },

    #[error("Failed to query page {url}: {source}")]
    Parsing {
        url: String,
        #[source]
        source: ParsingError,
    },

    #[error("File operation on {} failed: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON encoding failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CrawlError {
    pub fn navigation(url: &str, error: &anyhow::Error) -> Self {
        Self::Navigation {
            url: url.to_string(),
            reason: format!("{error:#}"),
        }
    }

    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }
}

pub type CrawlResult<T> = Result<T, CrawlError>;
