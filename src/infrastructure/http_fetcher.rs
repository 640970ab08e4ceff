//! HTTP page fetcher
//!
//! reqwest-backed [`PageFetcher`]: follows redirects, keeps cookies across
//! navigations the way a browser tab would, and reports the URL the page was
//! finally served from.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::browsing::{FetchedPage, NavigationError, NavigationResult, PageFetcher};
use super::config::CrawlingConfig;

/// HTTP fetcher used by the production browsing session
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher from the crawling configuration
    pub fn new(config: &CrawlingConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-IN,en;q=0.9"));

        let client = ClientBuilder::new()
            .timeout(config.navigation_timeout())
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            timeout: config.navigation_timeout(),
        })
    }

    fn request_error(&self, url: &Url, error: &reqwest::Error) -> NavigationError {
        if error.is_timeout() {
            NavigationError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else {
            NavigationError::Request {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> NavigationResult<FetchedPage> {
        debug!("HTTP GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.request_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NavigationError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(content_type) = response.headers().get(CONTENT_TYPE) {
            let content_type = content_type.to_str().unwrap_or_default();
            if !content_type.contains("html") {
                warn!("Unexpected content type '{}' from {}", content_type, url);
            }
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(|e| self.request_error(url, &e))?;
        debug!("Received {} bytes from {}", body.len(), final_url);

        Ok(FetchedPage::new(final_url, body))
    }
}
