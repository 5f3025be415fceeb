//! JSON file persistence for crawl results
//!
//! Files are pretty-printed with two-space indentation and keep non-ASCII
//! text (Vietnamese team names, status labels) as literal UTF-8. Writes
//! replace the whole file.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::domain::{MatchDetail, MatchRecord};
use crate::infrastructure::crawl_error::{CrawlError, CrawlResult};

/// Encode records exactly as they are written to disk
pub fn matches_to_json(records: &[MatchRecord]) -> CrawlResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write the match list, replacing any previous file
pub async fn save_matches(path: &Path, records: &[MatchRecord]) -> CrawlResult<()> {
    write_json(path, records).await?;
    info!("Saved {} matches to {}", records.len(), path.display());
    Ok(())
}

/// Read a match list written by [`save_matches`]
pub async fn load_matches(path: &Path) -> CrawlResult<Vec<MatchRecord>> {
    read_json(path).await
}

pub async fn save_detail(path: &Path, detail: &MatchDetail) -> CrawlResult<()> {
    write_json(path, detail).await?;
    info!(
        "Saved {} stream URLs for {} to {}",
        detail.stream_urls.len(),
        detail.url,
        path.display()
    );
    Ok(())
}

/// Keep the rendered HTML of a page for offline re-parsing
pub async fn save_snapshot(path: &Path, html: &str) -> CrawlResult<()> {
    write_file(path, html.as_bytes()).await?;
    info!("Saved page snapshot to {}", path.display());
    Ok(())
}

pub async fn load_snapshot(path: &Path) -> CrawlResult<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| CrawlError::persistence(path, e))
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> CrawlResult<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    write_file(path, content.as_bytes()).await
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> CrawlResult<T> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| CrawlError::persistence(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

async fn write_file(path: &Path, bytes: &[u8]) -> CrawlResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| CrawlError::persistence(parent, e))?;
    }

    fs::write(path, bytes)
        .await
        .map_err(|e| CrawlError::persistence(path, e))
}
