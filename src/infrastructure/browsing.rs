//! Browsing session abstraction
//!
//! The crawl navigates one page at a time and runs extractions against the
//! page it is currently on. [`PageFetcher`] is the seam between that flow and
//! the transport: production uses the reqwest-backed
//! [`HttpFetcher`](super::http_fetcher::HttpFetcher), tests plug in
//! in-memory fetchers.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

/// Navigation failures; all of them are recoverable at the crawl level
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavigationError {
    #[error("Invalid page locator '{locator}': {reason}")]
    InvalidUrl { locator: String, reason: String },

    #[error("Navigation to {url} timed out after {}s", .timeout.as_secs())]
    Timeout { url: String, timeout: Duration },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("No page loaded")]
    NoPageLoaded,
}

pub type NavigationResult<T> = Result<T, NavigationError>;

/// A fetched document together with the URL it was finally served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: Url,
    pub body: String,
}

impl FetchedPage {
    pub fn new(url: Url, body: impl Into<String>) -> Self {
        Self { url, body: body.into() }
    }
}

/// Loads a page by URL
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> NavigationResult<FetchedPage>;
}

/// Single reusable browsing context, navigated in place
pub struct BrowsingSession<F> {
    fetcher: F,
    timeout: Duration,
    current: Option<FetchedPage>,
}

impl<F: PageFetcher> BrowsingSession<F> {
    pub fn new(fetcher: F, timeout: Duration) -> Self {
        Self {
            fetcher,
            timeout,
            current: None,
        }
    }

    /// Navigate to `url`, bounded by the session timeout. On failure no page
    /// stays loaded, so stale content is never read.
    pub async fn goto(&mut self, url: &Url) -> NavigationResult<&Url> {
        self.current = None;
        info!("Navigating to {}", url);

        let page = match tokio::time::timeout(self.timeout, self.fetcher.fetch(url)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(NavigationError::Timeout {
                    url: url.to_string(),
                    timeout: self.timeout,
                });
            }
        };

        if page.url != *url {
            debug!("{} was served from {}", url, page.url);
        }
        let page = self.current.insert(page);
        Ok(&page.url)
    }

    /// Final URL of the loaded page
    pub fn current_url(&self) -> Option<&Url> {
        self.current.as_ref().map(|page| &page.url)
    }

    /// Run an extraction against the loaded page's document.
    ///
    /// The document is parsed inside this call and never escapes it, which
    /// keeps the non-`Send` DOM out of the surrounding futures.
    pub fn evaluate<T>(&self, extract: impl FnOnce(&Html, &Url) -> T) -> NavigationResult<T> {
        let page = self.current.as_ref().ok_or(NavigationError::NoPageLoaded)?;
        let document = Html::parse_document(&page.body);
        Ok(extract(&document, &page.url))
    }

    /// Trimmed text of the first element matching `selector`
    pub fn text_of(&self, selector: &Selector) -> NavigationResult<Option<String>> {
        self.evaluate(|document, _| {
            document
                .select(selector)
                .next()
                .map(|element| element.text().collect::<String>().trim().to_string())
        })
    }
}
