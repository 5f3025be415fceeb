use tracing::{debug, info};

use crate::domain::{MatchDetail, MatchList};
use crate::infrastructure::browser::PageSource;
use crate::infrastructure::config::{BrowserConfig, CrawlerConfig};
use crate::infrastructure::crawl_error::{CrawlError, CrawlResult};
use crate::infrastructure::parsing::{
    ContextualParser, DetailParseContext, HtmlDom, MatchDetailParser, MatchListParser,
    ParseContext,
};

/// Rendered listing page as returned by the browser
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub url: String,
    pub html: String,
}

/// Crawler for the match listing and match detail pages
#[derive(Debug, Clone)]
pub struct MatchCrawler {
    config: CrawlerConfig,
    list_url: String,
    list_parser: MatchListParser,
    detail_parser: MatchDetailParser,
}

impl MatchCrawler {
    /// Create a new match crawler
    pub fn new(config: CrawlerConfig) -> CrawlResult<Self> {
        let list_url = config.list_url().map_err(|e| CrawlError::Config {
            reason: format!("{e:#}"),
        })?;
        let invalid = |e: crate::infrastructure::parsing::ParsingError| CrawlError::Config {
            reason: e.to_string(),
        };
        let list_parser = MatchListParser::with_config(&config.parsing).map_err(invalid)?;
        let detail_parser = MatchDetailParser::with_config(&config.parsing).map_err(invalid)?;

        Ok(Self {
            config,
            list_url,
            list_parser,
            detail_parser,
        })
    }

    pub fn list_url(&self) -> &str {
        &self.list_url
    }

    pub fn browser_config(&self) -> &BrowserConfig {
        &self.config.browser
    }

    /// Load the listing page and extract its matches
    pub fn crawl_matches(&self, pages: &impl PageSource) -> CrawlResult<MatchList> {
        let page = self.fetch_list_page(pages)?;
        let list = self.parse_list_snapshot(&page.html, &page.url)?;
        info!("Crawled {} matches from {}", list.len(), page.url);
        Ok(list)
    }

    /// Load the listing page, waiting for match links to show up
    pub fn fetch_list_page(&self, pages: &impl PageSource) -> CrawlResult<RenderedPage> {
        info!("Crawling matches from {}", self.list_url);
        let ready_selector = self
            .config
            .browser
            .ready_selector
            .as_deref()
            .unwrap_or(self.list_parser.anchor_selector());

        let html = pages.load_page(&self.list_url, Some(ready_selector))?;
        debug!("Listing page rendered ({} bytes)", html.len());

        Ok(RenderedPage {
            url: self.list_url.clone(),
            html,
        })
    }

    /// Extract matches from rendered listing HTML; relative links resolve against `page_url`
    pub fn parse_list_snapshot(&self, html: &str, page_url: &str) -> CrawlResult<MatchList> {
        let dom = HtmlDom::parse_document(html);
        let context = ParseContext::for_page(page_url);

        let list = self
            .list_parser
            .parse_with_context(&dom, &context)
            .map_err(|source| CrawlError::Parsing {
                url: page_url.to_string(),
                source,
            })?;

        let stats = &list.stats;
        if stats.lookup_failures > 0 {
            info!(
                "{} field lookups failed on {} and were treated as missing",
                stats.lookup_failures, page_url
            );
        }
        Ok(list)
    }

    /// Load one match page and collect its stream sources
    pub fn crawl_match_detail(
        &self,
        pages: &impl PageSource,
        match_url: &str,
    ) -> CrawlResult<MatchDetail> {
        info!("Crawling match detail: {}", match_url);
        let html = pages.load_page(match_url, None)?;
        self.parse_detail_snapshot(&html, match_url)
    }

    /// Collect stream sources from rendered detail HTML
    pub fn parse_detail_snapshot(&self, html: &str, match_url: &str) -> CrawlResult<MatchDetail> {
        let dom = HtmlDom::parse_document(html);
        let context = DetailParseContext::new(match_url.to_string());

        self.detail_parser
            .parse_with_context(&dom, &context)
            .map_err(|source| CrawlError::Parsing {
                url: match_url.to_string(),
                source,
            })
    }
}
