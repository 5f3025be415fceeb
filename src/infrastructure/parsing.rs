//! DOM extraction for the match listing and match detail pages
//!
//! The parsers never talk to the browser. They query a [`DomAccessor`], which
//! in production is an [`HtmlDom`] built from the HTML the browser rendered,
//! and in tests is the same type built from a fixture string.

pub mod config;
pub mod context;
pub mod error;
pub mod html_dom;
pub mod match_detail_parser;
pub mod match_list_parser;

// Re-export public types
pub use config::{MatchDetailSelectors, MatchListSelectors, ParsingConfig};
pub use context::{DetailParseContext, ParseContext};
pub use error::{ParsingError, ParsingResult};
pub use html_dom::HtmlDom;
pub use match_detail_parser::MatchDetailParser;
pub use match_list_parser::{Extraction, MatchListParser, SkipReason};

/// Read-only queries over a rendered document.
///
/// Lookups that can fail for reasons other than "nothing matched" (an
/// unparsable selector, for instance) return `ParsingResult`, so callers can
/// decide per call site whether the failure is local or fatal.
pub trait DomAccessor {
    /// Handle to one element, borrowed from the accessor
    type Element<'a>: Clone
    where
        Self: 'a;

    /// All elements in the document matching `selector`, in document order
    fn find_all(&self, selector: &str) -> ParsingResult<Vec<Self::Element<'_>>>;

    /// All descendants of `scope` matching `selector`, in document order
    fn find_all_in<'a>(
        &'a self,
        scope: &Self::Element<'a>,
        selector: &str,
    ) -> ParsingResult<Vec<Self::Element<'a>>>;

    /// First descendant of `scope` matching `selector`
    fn find_one<'a>(
        &'a self,
        scope: &Self::Element<'a>,
        selector: &str,
    ) -> ParsingResult<Option<Self::Element<'a>>>;

    /// Nearest proper ancestor of `element` matching `marker`
    fn find_ancestor<'a>(
        &'a self,
        element: &Self::Element<'a>,
        marker: &str,
    ) -> ParsingResult<Option<Self::Element<'a>>>;

    /// Immediate parent element, if `element` has one
    fn parent<'a>(&'a self, element: &Self::Element<'a>) -> Option<Self::Element<'a>>;

    fn attribute<'a>(&'a self, element: &Self::Element<'a>, name: &str) -> Option<String>;

    /// Visible text, whitespace-collapsed and trimmed
    fn text<'a>(&'a self, element: &Self::Element<'a>) -> String;
}

/// Parser that extracts a typed result from a whole document
pub trait ContextualParser {
    type Output;
    type Context;

    /// Parse a document with contextual information
    fn parse_with_context<D: DomAccessor>(
        &self,
        dom: &D,
        context: &Self::Context,
    ) -> ParsingResult<Self::Output>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs both parsers through the trait only, as the crawler does
    fn parse_both<D: DomAccessor>(dom: &D) -> (usize, usize) {
        let list = MatchListParser::new()
            .parse_with_context(dom, &ParseContext::for_page("https://st.90phut27.com/home"))
            .unwrap();
        let detail = MatchDetailParser::new()
            .parse_with_context(dom, &DetailParseContext::new("https://st.90phut27.com/x".into()))
            .unwrap();
        (list.len(), detail.stream_urls.len())
    }

    #[test]
    fn test_parsers_are_generic_over_the_accessor() {
        let dom = HtmlDom::parse_document(
            r#"<div class="xitem2"><a href="/truc-tiep/a-vs-b-1">a</a>
               <iframe src="https://player/1"></iframe></div>"#,
        );
        assert_eq!(parse_both(&dom), (1, 1));
    }
}
