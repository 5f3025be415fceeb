//! Parsing context for DOM extraction
//!
//! Provides context objects describing the page being parsed.

/// Context information for a match listing page
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// URL the document was loaded from
    pub page_url: String,

    /// Base URL for resolving relative links
    pub base_url: String,
}

impl ParseContext {
    /// Create new parse context
    pub fn new(page_url: String, base_url: String) -> Self {
        Self { page_url, base_url }
    }

    /// Context for a page whose links resolve against its own URL
    pub fn for_page(page_url: &str) -> Self {
        Self::new(page_url.to_string(), page_url.to_string())
    }
}

/// Context for a match detail page
#[derive(Debug, Clone)]
pub struct DetailParseContext {
    /// Match URL being parsed
    pub url: String,
}

impl DetailParseContext {
    /// Create new detail parse context
    pub fn new(url: String) -> Self {
        Self { url }
    }
}
