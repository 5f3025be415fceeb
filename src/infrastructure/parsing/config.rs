//! Parsing configuration for DOM extraction
//!
//! Centralized configuration for CSS selectors and the site markers the
//! parsers depend on.

use serde::{Deserialize, Serialize};

use super::error::{ParsingError, ParsingResult};
use crate::domain::constants::site;

/// Main parsing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Base URL for resolving relative links
    pub base_url: String,

    /// Literal substring identifying a match detail link
    pub match_path_marker: String,

    /// Value stored in `MatchRecord::source`
    pub source_name: String,

    /// Match list selectors
    pub match_list_selectors: MatchListSelectors,

    /// Match detail selectors
    pub match_detail_selectors: MatchDetailSelectors,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            base_url: site::BASE_URL.to_string(),
            match_path_marker: site::MATCH_PATH_MARKER.to_string(),
            source_name: site::SOURCE_NAME.to_string(),
            match_list_selectors: MatchListSelectors::default(),
            match_detail_selectors: MatchDetailSelectors::default(),
        }
    }
}

impl ParsingConfig {
    /// Path segment form of the marker, e.g. "truc-tiep" for "/truc-tiep/"
    pub fn marker_segment(&self) -> &str {
        self.match_path_marker.trim_matches('/')
    }

    pub fn validate(&self) -> ParsingResult<()> {
        if self.marker_segment().is_empty() {
            return Err(ParsingError::ConfigurationError {
                message: "match path marker must contain a path segment".to_string(),
                field: "match_path_marker".to_string(),
            });
        }
        if self.match_path_marker.trim_matches('/').contains('/') {
            return Err(ParsingError::ConfigurationError {
                message: "match path marker must be a single path segment".to_string(),
                field: "match_path_marker".to_string(),
            });
        }

        let selectors = [
            ("match_list_selectors.anchor", &self.match_list_selectors.anchor),
            ("match_list_selectors.container", &self.match_list_selectors.container),
            ("match_list_selectors.home_team", &self.match_list_selectors.home_team),
            ("match_list_selectors.away_team", &self.match_list_selectors.away_team),
            ("match_list_selectors.match_time", &self.match_list_selectors.match_time),
            ("match_list_selectors.status", &self.match_list_selectors.status),
            ("match_list_selectors.match_status", &self.match_list_selectors.match_status),
            ("match_detail_selectors.frame", &self.match_detail_selectors.frame),
            ("match_detail_selectors.video", &self.match_detail_selectors.video),
            ("match_detail_selectors.video_source", &self.match_detail_selectors.video_source),
        ];
        for (field, selector) in selectors {
            if selector.trim().is_empty() {
                return Err(ParsingError::ConfigurationError {
                    message: "selector must not be empty".to_string(),
                    field: field.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// CSS selectors for the match listing page.
///
/// Field selectors are evaluated relative to the match container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchListSelectors {
    /// Anchors that may point at a match page
    pub anchor: String,

    /// Ancestor grouping one match's display fields
    pub container: String,

    pub home_team: String,
    pub away_team: String,

    /// Displayed kick-off time
    pub match_time: String,

    /// Primary status label
    pub status: String,

    /// Secondary status marker; its presence alone means the match is live
    pub match_status: String,
}

impl Default for MatchListSelectors {
    fn default() -> Self {
        Self {
            anchor: "a.match-link, a[href*='/truc-tiep/']".to_string(),
            container: "div[class*='xitem2']".to_string(),
            home_team: "span.team-home .name".to_string(),
            away_team: "span.team-away .name".to_string(),
            match_time: "span.xtime b".to_string(),
            status: "span.xstatus".to_string(),
            match_status: "span.match-status".to_string(),
        }
    }
}

/// CSS selectors for a match detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchDetailSelectors {
    /// Embedded player frames
    pub frame: String,
    pub video: String,
    /// Source tags, relative to a video element
    pub video_source: String,
}

impl Default for MatchDetailSelectors {
    fn default() -> Self {
        Self {
            frame: "iframe".to_string(),
            video: "video".to_string(),
            video_source: "source".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ParsingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.marker_segment(), "truc-tiep");
    }

    #[test]
    fn test_empty_marker_is_rejected() {
        let config = ParsingConfig {
            match_path_marker: "//".to_string(),
            ..ParsingConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_empty_selector_is_rejected() {
        let mut config = ParsingConfig::default();
        config.match_list_selectors.home_team = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ParsingError::ConfigurationError { field, .. }) if field == "match_list_selectors.home_team"
        ));
    }
}
