//! Parsing context for HTML extraction
//!
//! Provides context objects carried into parsing operations.

use url::Url;

/// Context for parsing a season listing page
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Final URL of the listing page, used to resolve relative links
    pub page_url: Url,

    /// Season path the page was reached through
    pub season_path: String,
}

impl ParseContext {
    /// Create new parse context
    pub fn new(page_url: Url, season_path: impl Into<String>) -> Self {
        Self {
            page_url,
            season_path: season_path.into(),
        }
    }
}

/// Detail parsing context for company detail pages
#[derive(Debug, Clone)]
pub struct DetailParseContext {
    /// Company URL being parsed
    pub url: Url,

    /// Company label from the listing page, if any
    pub company: Option<String>,
}

impl DetailParseContext {
    /// Create new detail parse context
    pub fn new(url: Url) -> Self {
        Self { url, company: None }
    }

    /// Set the company label
    pub fn with_company(mut self, company: Option<String>) -> Self {
        self.company = company;
        self
    }
}
