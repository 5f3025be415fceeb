//! Match list parser
//!
//! Turns the anchors of the listing page into deduplicated `MatchRecord`s.
//! Every field lookup is isolated: a missing or failing lookup leaves its
//! field at the default and never drops the record. Only an anchor that is
//! not a match link at all is skipped.

use std::collections::HashSet;
use std::fmt;
use tracing::{debug, trace, warn};
use url::Url;

use super::config::{MatchListSelectors, ParsingConfig};
use super::{ContextualParser, DomAccessor, ParseContext, ParsingError, ParsingResult};
use crate::domain::constants::status::LIVE_INDICATOR;
use crate::domain::{ExtractionStats, MatchList, MatchRecord, MatchStatus};

/// Why an anchor did not produce a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No usable `href` attribute
    MissingHref,
    /// `href` does not contain the match path marker
    NotMatchLink,
    /// `href` has the marker but no match slug after it
    MalformedPath,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::MissingHref => "missing href",
            Self::NotMatchLink => "not a match link",
            Self::MalformedPath => "malformed match path",
        };
        f.write_str(reason)
    }
}

/// Outcome of extracting one anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Record(MatchRecord),
    Skip(SkipReason),
}

impl Extraction {
    pub fn into_record(self) -> Option<MatchRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Skip(_) => None,
        }
    }
}

/// Parser for the match listing page
#[derive(Debug, Clone)]
pub struct MatchListParser {
    selectors: MatchListSelectors,
    match_path_marker: String,
    marker_segment: String,
    source_name: String,
}

impl Default for MatchListParser {
    fn default() -> Self {
        Self::build(&ParsingConfig::default())
    }
}

impl MatchListParser {
    /// Create a new match list parser with default selectors
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parser with custom configuration
    pub fn with_config(config: &ParsingConfig) -> ParsingResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &ParsingConfig) -> Self {
        Self {
            selectors: config.match_list_selectors.clone(),
            match_path_marker: config.match_path_marker.clone(),
            marker_segment: config.marker_segment().to_string(),
            source_name: config.source_name.clone(),
        }
    }

    /// Selector for the candidate anchors on a listing page
    pub fn anchor_selector(&self) -> &str {
        &self.selectors.anchor
    }

    /// Extract a single anchor into a record, or say why it was skipped.
    pub fn extract<'a, D: DomAccessor>(
        &self,
        anchor: &D::Element<'a>,
        dom: &'a D,
        context: &ParseContext,
    ) -> Extraction {
        self.extract_with_stats(anchor, dom, context, &mut ExtractionStats::default())
    }

    /// Extract every anchor and keep the first record per URL, in input order.
    pub fn run<'a, D: DomAccessor>(
        &self,
        anchors: &[D::Element<'a>],
        dom: &'a D,
        context: &ParseContext,
    ) -> Vec<MatchRecord> {
        self.collect(anchors, dom, context).records
    }

    /// Same as [`run`](Self::run), also returning the diagnostic counters.
    pub fn collect<'a, D: DomAccessor>(
        &self,
        anchors: &[D::Element<'a>],
        dom: &'a D,
        context: &ParseContext,
    ) -> MatchList {
        let mut stats = ExtractionStats {
            anchors_seen: anchors.len(),
            ..ExtractionStats::default()
        };
        let mut seen_urls: HashSet<String> = HashSet::new();
        let mut records = Vec::new();

        for (index, anchor) in anchors.iter().enumerate() {
            match self.extract_with_stats(anchor, dom, context, &mut stats) {
                Extraction::Skip(reason) => {
                    debug!("Skipping anchor {} on {}: {}", index, context.page_url, reason);
                    stats.skipped += 1;
                }
                Extraction::Record(record) => {
                    if seen_urls.insert(record.url.clone()) {
                        records.push(record);
                    } else {
                        trace!("Duplicate match link {}", record.url);
                        stats.duplicates += 1;
                    }
                }
            }
        }

        debug!(
            "Extracted {} matches from {} anchors on {} ({} skipped, {} duplicates)",
            records.len(),
            stats.anchors_seen,
            context.page_url,
            stats.skipped,
            stats.duplicates
        );

        MatchList { records, stats }
    }

    fn extract_with_stats<'a, D: DomAccessor>(
        &self,
        anchor: &D::Element<'a>,
        dom: &'a D,
        context: &ParseContext,
        stats: &mut ExtractionStats,
    ) -> Extraction {
        let Some(href) = dom
            .attribute(anchor, "href")
            .map(|href| href.trim().to_string())
            .filter(|href| !href.is_empty())
        else {
            return Extraction::Skip(SkipReason::MissingHref);
        };

        if !href.contains(&self.match_path_marker) {
            return Extraction::Skip(SkipReason::NotMatchLink);
        }

        let mut url = match resolve_url(&href, &context.base_url) {
            Ok(url) => url,
            Err(e) => {
                debug!("{}", e);
                return Extraction::Skip(SkipReason::MalformedPath);
            }
        };

        // In-page anchors point at the same match.
        url.set_fragment(None);

        let Some(match_id) = match_id_from_url(&url, &self.marker_segment) else {
            return Extraction::Skip(SkipReason::MalformedPath);
        };

        let container = self.resolve_container(anchor, dom);

        let home_team = self
            .lookup_text(&container, dom, "home_team", &self.selectors.home_team, stats)
            .unwrap_or_default();
        let away_team = self
            .lookup_text(&container, dom, "away_team", &self.selectors.away_team, stats)
            .unwrap_or_default();
        let match_time = self
            .lookup_text(&container, dom, "match_time", &self.selectors.match_time, stats)
            .unwrap_or_default();
        let status = self.extract_status(&container, dom, stats);

        Extraction::Record(MatchRecord::new(
            match_id,
            url.to_string(),
            home_team,
            away_team,
            match_time,
            status,
            &self.source_name,
        ))
    }

    /// Marked ancestor, then parent, then the anchor itself.
    fn resolve_container<'a, D: DomAccessor>(
        &self,
        anchor: &D::Element<'a>,
        dom: &'a D,
    ) -> D::Element<'a> {
        let strategies: [(&str, &dyn Fn() -> Option<D::Element<'a>>); 3] = [
            ("marked ancestor", &|| self.marked_ancestor(anchor, dom)),
            ("parent", &|| dom.parent(anchor)),
            ("anchor", &|| Some(anchor.clone())),
        ];

        strategies
            .iter()
            .find_map(|(name, strategy)| {
                let container = strategy()?;
                trace!("Resolved match container via {}", name);
                Some(container)
            })
            .unwrap_or_else(|| anchor.clone())
    }

    fn marked_ancestor<'a, D: DomAccessor>(
        &self,
        anchor: &D::Element<'a>,
        dom: &'a D,
    ) -> Option<D::Element<'a>> {
        dom.find_ancestor(anchor, &self.selectors.container)
            .unwrap_or_else(|e| {
                warn!("Container lookup failed, falling back: {}", e);
                None
            })
    }

    /// Status label first; the bare match-status marker only when there is no label.
    fn extract_status<'a, D: DomAccessor>(
        &self,
        container: &D::Element<'a>,
        dom: &'a D,
        stats: &mut ExtractionStats,
    ) -> MatchStatus {
        if let Some(label) = self.lookup(container, dom, "status", &self.selectors.status, stats) {
            let text = dom.text(&label);
            return if text.to_lowercase().contains(LIVE_INDICATOR) {
                MatchStatus::Live
            } else if !text.is_empty() {
                MatchStatus::from(text)
            } else {
                MatchStatus::Upcoming
            };
        }

        // Presence alone counts as live, whatever the marker says.
        if self
            .lookup(container, dom, "match_status", &self.selectors.match_status, stats)
            .is_some()
        {
            return MatchStatus::Live;
        }

        MatchStatus::Upcoming
    }

    fn lookup_text<'a, D: DomAccessor>(
        &self,
        container: &D::Element<'a>,
        dom: &'a D,
        field: &str,
        selector: &str,
        stats: &mut ExtractionStats,
    ) -> Option<String> {
        self.lookup(container, dom, field, selector, stats)
            .map(|element| dom.text(&element))
    }

    fn lookup<'a, D: DomAccessor>(
        &self,
        container: &D::Element<'a>,
        dom: &'a D,
        field: &str,
        selector: &str,
        stats: &mut ExtractionStats,
    ) -> Option<D::Element<'a>> {
        match dom.find_one(container, selector) {
            Ok(Some(element)) => Some(element),
            Ok(None) => {
                trace!("Field '{}' not found with '{}'", field, selector);
                stats.fields_missing += 1;
                None
            }
            Err(e) => {
                warn!("Lookup for field '{}' failed, treating as missing: {}", field, e);
                stats.lookup_failures += 1;
                None
            }
        }
    }
}

impl ContextualParser for MatchListParser {
    type Output = MatchList;
    type Context = ParseContext;

    /// Query the anchors of a listing page and extract them.
    ///
    /// Only a failing anchor query is an error; per-anchor problems are not.
    fn parse_with_context<D: DomAccessor>(
        &self,
        dom: &D,
        context: &Self::Context,
    ) -> ParsingResult<Self::Output> {
        debug!("Parsing match list for {}", context.page_url);
        let anchors = dom.find_all(self.anchor_selector())?;
        Ok(self.collect(&anchors, dom, context))
    }
}

/// Resolve an href against the page base URL.
fn resolve_url(href: &str, base_url: &str) -> ParsingResult<Url> {
    match Url::parse(href) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(base_url).map_err(|e| {
                ParsingError::url_resolution_failed(
                    base_url,
                    &format!("Invalid base URL: {e}"),
                    None,
                )
            })?;
            base.join(href).map_err(|e| {
                ParsingError::url_resolution_failed(
                    href,
                    &format!("Failed to join URL: {e}"),
                    Some(base_url),
                )
            })
        }
        Err(e) => Err(ParsingError::url_resolution_failed(
            href,
            &e.to_string(),
            Some(base_url),
        )),
    }
}

/// Last non-empty path segment plus the query, if any, provided the path has
/// the marker segment and at least one other segment. Distinct URLs thus keep
/// distinct ids.
fn match_id_from_url(url: &Url, marker_segment: &str) -> Option<String> {
    let segments: Vec<&str> = url
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.len() < 2 || !segments.contains(&marker_segment) {
        return None;
    }

    let last = segments.last()?;
    Some(match url.query() {
        Some(query) => format!("{last}?{query}"),
        None => (*last).to_string(),
    })
}
