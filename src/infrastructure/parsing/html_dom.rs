//! `DomAccessor` over a rendered HTML snapshot
//!
//! The browser hands back the document as it looks after scripts ran; this
//! type re-parses it with `scraper` so extraction can run without holding the
//! browser, and so tests can feed fixture markup through the same code path.

use scraper::{ElementRef, Html, Selector};
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::trace;

use super::DomAccessor;
use super::error::{ParsingError, ParsingResult};

/// Parsed HTML document with a per-document selector cache
pub struct HtmlDom {
    document: Html,
    selectors: RefCell<HashMap<String, Selector>>,
}

impl HtmlDom {
    /// Parse a full HTML document
    pub fn parse_document(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
            selectors: RefCell::new(HashMap::new()),
        }
    }

    /// Compile a selector once per document
    fn compile(&self, selector: &str) -> ParsingResult<Selector> {
        if let Some(compiled) = self.selectors.borrow().get(selector) {
            return Ok(compiled.clone());
        }

        let compiled = Selector::parse(selector)
            .map_err(|e| ParsingError::invalid_selector(selector, &e.to_string()))?;
        trace!("Compiled selector '{}'", selector);
        self.selectors
            .borrow_mut()
            .insert(selector.to_string(), compiled.clone());
        Ok(compiled)
    }
}

impl std::fmt::Debug for HtmlDom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlDom")
            .field("cached_selectors", &self.selectors.borrow().len())
            .finish_non_exhaustive()
    }
}

impl DomAccessor for HtmlDom {
    type Element<'a> = ElementRef<'a>;

    fn find_all(&self, selector: &str) -> ParsingResult<Vec<ElementRef<'_>>> {
        let compiled = self.compile(selector)?;
        Ok(self.document.select(&compiled).collect())
    }

    fn find_all_in<'a>(
        &'a self,
        scope: &ElementRef<'a>,
        selector: &str,
    ) -> ParsingResult<Vec<ElementRef<'a>>> {
        let compiled = self.compile(selector)?;
        Ok(scope.select(&compiled).collect())
    }

    fn find_one<'a>(
        &'a self,
        scope: &ElementRef<'a>,
        selector: &str,
    ) -> ParsingResult<Option<ElementRef<'a>>> {
        let compiled = self.compile(selector)?;
        Ok(scope.select(&compiled).next())
    }

    fn find_ancestor<'a>(
        &'a self,
        element: &ElementRef<'a>,
        marker: &str,
    ) -> ParsingResult<Option<ElementRef<'a>>> {
        let compiled = self.compile(marker)?;
        Ok(element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|ancestor| compiled.matches(ancestor)))
    }

    fn parent<'a>(&'a self, element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
        element.parent().and_then(ElementRef::wrap)
    }

    fn attribute<'a>(&'a self, element: &ElementRef<'a>, name: &str) -> Option<String> {
        element.value().attr(name).map(str::to_string)
    }

    fn text<'a>(&'a self, element: &ElementRef<'a>) -> String {
        element
            .text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="list">
            <div class="xitem2 live-row">
              <p><a id="a1" href="/truc-tiep/a-vs-b-1">watch</a></p>
              <span class="team-home"><span class="name">  Team
                 A </span></span>
            </div>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_find_ancestor_skips_non_matching_parents() {
        let dom = HtmlDom::parse_document(PAGE);
        let anchor = dom.find_all("a#a1").unwrap()[0];

        let container = dom
            .find_ancestor(&anchor, "div[class*='xitem2']")
            .unwrap()
            .expect("marked ancestor");
        assert!(container.value().classes().any(|c| c == "xitem2"));

        let parent = dom.parent(&anchor).expect("parent");
        assert_eq!(parent.value().name(), "p");
    }

    #[test]
    fn test_text_is_whitespace_collapsed() {
        let dom = HtmlDom::parse_document(PAGE);
        let name = dom.find_all("span.team-home .name").unwrap()[0];
        assert_eq!(dom.text(&name), "Team A");
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let dom = HtmlDom::parse_document(PAGE);
        let err = dom.find_all("div[[").unwrap_err();
        assert!(matches!(err, ParsingError::InvalidSelector { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_root_element_has_no_parent_element() {
        let dom = HtmlDom::parse_document(PAGE);
        let html = dom.find_all("html").unwrap()[0];
        assert!(dom.parent(&html).is_none());
    }
}
