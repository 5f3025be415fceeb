use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::constants::status::{LIVE_LABEL, UPCOMING_LABEL};

/// Normalized match status.
///
/// Serialized as a plain string: `"upcoming"`, `"live"`, or the label shown
/// by the site verbatim. Conversion from a string is canonical, so a label
/// that reads `"live"` always comes back as `Live`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatchStatus {
    #[default]
    Upcoming,
    Live,
    Other(String),
}

impl MatchStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Upcoming => UPCOMING_LABEL,
            Self::Live => LIVE_LABEL,
            Self::Other(label) => label,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }
}

impl From<String> for MatchStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            UPCOMING_LABEL => Self::Upcoming,
            LIVE_LABEL => Self::Live,
            _ => Self::Other(label),
        }
    }
}

impl From<&str> for MatchStatus {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<MatchStatus> for String {
    fn from(status: MatchStatus) -> Self {
        match status {
            MatchStatus::Other(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One match found on the listing page.
///
/// Field order is the JSON key order of the exported file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Last non-empty path segment of `url`, with its query if it has one
    pub match_id: String,
    /// Same value as `match_id` for this site
    pub stream_id: String,
    /// Absolute URL of the match page
    pub url: String,
    pub home_team: String,
    pub away_team: String,
    /// Kick-off time exactly as displayed, e.g. "21:00"
    pub match_time: String,
    /// Always "{home_team} vs {away_team}"
    pub full_text: String,
    pub status: MatchStatus,
    pub source: String,
    pub crawled_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Assemble a record, deriving `stream_id`, `full_text` and `crawled_at`.
    pub fn new(
        match_id: String,
        url: String,
        home_team: String,
        away_team: String,
        match_time: String,
        status: MatchStatus,
        source: &str,
    ) -> Self {
        let full_text = format!("{home_team} vs {away_team}");
        Self {
            stream_id: match_id.clone(),
            match_id,
            url,
            home_team,
            away_team,
            match_time,
            full_text,
            status,
            source: source.to_string(),
            crawled_at: Utc::now(),
        }
    }
}

/// Stream sources found on one match page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDetail {
    pub url: String,
    /// Frame sources first, then video sources, in document order. Not deduplicated.
    pub stream_urls: Vec<String>,
    pub crawled_at: DateTime<Utc>,
}

impl MatchDetail {
    pub fn new(url: String, stream_urls: Vec<String>) -> Self {
        Self {
            url,
            stream_urls,
            crawled_at: Utc::now(),
        }
    }
}

/// Diagnostic counters for one list extraction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    /// Anchors handed to the collector
    pub anchors_seen: usize,
    /// Anchors that were not match links
    pub skipped: usize,
    /// Match links whose URL had already been collected
    pub duplicates: usize,
    /// Field lookups that found nothing
    pub fields_missing: usize,
    /// Field lookups that failed outright and were treated as missing
    pub lookup_failures: usize,
}

/// Result of a list extraction pass
#[derive(Debug, Clone, Default)]
pub struct MatchList {
    pub records: Vec<MatchRecord>,
    pub stats: ExtractionStats,
}

impl MatchList {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_text_with_missing_sides() {
        let record = MatchRecord::new(
            "abc-1".to_string(),
            "https://site/truc-tiep/abc-1".to_string(),
            "Arsenal".to_string(),
            String::new(),
            String::new(),
            MatchStatus::Upcoming,
            "90phut27",
        );
        assert_eq!(record.full_text, "Arsenal vs ");
        assert_eq!(record.stream_id, record.match_id);
    }

    #[test]
    fn test_status_labels_are_canonical() {
        assert_eq!(MatchStatus::from("live"), MatchStatus::Live);
        assert_eq!(MatchStatus::from("upcoming"), MatchStatus::Upcoming);
        assert_eq!(MatchStatus::from("HT"), MatchStatus::Other("HT".to_string()));
        assert_eq!(String::from(MatchStatus::Other("FT".to_string())), "FT");
    }

    #[test]
    fn test_status_serializes_as_plain_string() {
        let json = serde_json::to_string(&MatchStatus::Live).unwrap();
        assert_eq!(json, "\"live\"");

        let parsed: MatchStatus = serde_json::from_str("\"Hiệp 2\"").unwrap();
        assert_eq!(parsed, MatchStatus::Other("Hiệp 2".to_string()));
    }
}
