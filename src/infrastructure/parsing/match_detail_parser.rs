//! Match detail parser
//!
//! Collects the stream sources embedded in a match page: frame sources first,
//! then the source tags of every video element.

use tracing::debug;

use super::config::{MatchDetailSelectors, ParsingConfig};
use super::context::DetailParseContext;
use super::{ContextualParser, DomAccessor, ParsingResult};
use crate::domain::MatchDetail;

/// Parser for match detail pages
#[derive(Debug, Clone, Default)]
pub struct MatchDetailParser {
    selectors: MatchDetailSelectors,
}

impl MatchDetailParser {
    /// Create a new match detail parser with default selectors
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parser with custom configuration
    pub fn with_config(config: &ParsingConfig) -> ParsingResult<Self> {
        config.validate()?;
        Ok(Self {
            selectors: config.match_detail_selectors.clone(),
        })
    }

    /// Stream URLs in document order, frames before videos. Empty sources are
    /// dropped, duplicates are kept.
    pub fn collect_streams<D: DomAccessor>(
        &self,
        dom: &D,
        context: &DetailParseContext,
    ) -> ParsingResult<MatchDetail> {
        let mut stream_urls = Vec::new();

        for frame in dom.find_all(&self.selectors.frame)? {
            stream_urls.extend(non_empty_src(dom, &frame));
        }
        let frame_count = stream_urls.len();

        for video in dom.find_all(&self.selectors.video)? {
            for source in dom.find_all_in(&video, &self.selectors.video_source)? {
                stream_urls.extend(non_empty_src(dom, &source));
            }
        }

        debug!(
            "Collected {} stream URLs from {} ({} frames, {} video sources)",
            stream_urls.len(),
            context.url,
            frame_count,
            stream_urls.len() - frame_count
        );

        Ok(MatchDetail::new(context.url.clone(), stream_urls))
    }
}

impl ContextualParser for MatchDetailParser {
    type Output = MatchDetail;
    type Context = DetailParseContext;

    fn parse_with_context<D: DomAccessor>(
        &self,
        dom: &D,
        context: &Self::Context,
    ) -> ParsingResult<Self::Output> {
        self.collect_streams(dom, context)
    }
}

fn non_empty_src<'a, D: DomAccessor>(dom: &'a D, element: &D::Element<'a>) -> Option<String> {
    dom.attribute(element, "src")
        .map(|src| src.trim().to_string())
        .filter(|src| !src.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::parsing::HtmlDom;

    #[test]
    fn test_frames_come_before_videos() {
        let dom = HtmlDom::parse_document(
            r#"<video><source src="v1"></video>
               <iframe src="f1"></iframe>
               <iframe></iframe>
               <iframe src="f1"></iframe>"#,
        );
        let detail = MatchDetailParser::new()
            .collect_streams(&dom, &DetailParseContext::new("https://x/truc-tiep/m".to_string()))
            .unwrap();
        assert_eq!(detail.stream_urls, vec!["f1", "f1", "v1"]);
        assert_eq!(detail.url, "https://x/truc-tiep/m");
    }

    #[test]
    fn test_page_without_players_yields_no_streams() {
        let dom = HtmlDom::parse_document("<p>Trận đấu chưa bắt đầu</p>");
        let detail = MatchDetailParser::new()
            .parse_with_context(&dom, &DetailParseContext::new("u".to_string()))
            .unwrap();
        assert!(detail.stream_urls.is_empty());
    }
}
