//! Season crawl loop
//!
//! Walks every configured season listing page in order, then every company
//! found on it, and collects one entry per company detail page that yields
//! fields. A failing season or company is logged and skipped; the crawl
//! itself never fails.

#![allow(clippy::uninlined_format_args)]

use thiserror::Error;
use tracing::{error, info, warn};
use url::Url;

use super::crawl_summary::CrawlSummary;
use crate::domain::{CompanyRef, ListingPageRef, ScrapedData, ScrapedEntry};
use crate::infrastructure::browsing::{BrowsingSession, NavigationError, PageFetcher};
use crate::infrastructure::config::SiteConfig;
use crate::infrastructure::parsing::{
    CompanyDetailParser, CompanyListParser, ContextualParser, DetailParseContext, ParseContext, ParsingConfig,
    ParsingError, ParsingResult,
};

/// Why a season listing page was skipped
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeasonError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Parsing(#[from] ParsingError),
}

/// Why a company was skipped
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompanyError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error("No fields extracted from {url}")]
    Empty { url: String },
}

/// Everything a crawl run produced
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    pub data: ScrapedData,
    pub summary: CrawlSummary,
}

/// Sequential crawler over season listing pages, driving a single session
pub struct SeasonCrawler<F> {
    session: BrowsingSession<F>,
    list_parser: CompanyListParser,
    detail_parser: CompanyDetailParser,
}

impl<F: PageFetcher> SeasonCrawler<F> {
    pub fn new(session: BrowsingSession<F>, parsing: &ParsingConfig) -> ParsingResult<Self> {
        Ok(Self {
            session,
            list_parser: CompanyListParser::with_config(&parsing.listing)?,
            detail_parser: CompanyDetailParser::with_config(&parsing.detail)?,
        })
    }

    /// Crawl every season of `site` in declared order
    pub async fn run(&mut self, site: &SiteConfig) -> CrawlOutcome {
        let mut outcome = CrawlOutcome::default();

        for page in &site.season_paths {
            outcome.summary.seasons_attempted += 1;
            if let Err(e) = self.crawl_season(&site.base_url, page, &mut outcome).await {
                error!("Failed to scrape season {}: {}", page, e);
                outcome.summary.seasons_skipped += 1;
            }
        }

        outcome.summary.entries = outcome.data.len();
        outcome.summary.log();
        outcome
    }

    async fn crawl_season(
        &mut self,
        base_url: &str,
        page: &ListingPageRef,
        outcome: &mut CrawlOutcome,
    ) -> Result<(), SeasonError> {
        let locator = page.locate(base_url).map_err(|e| NavigationError::InvalidUrl {
            locator: format!("{}{}", base_url, page),
            reason: e.to_string(),
        })?;

        info!("Navigating to season {}", locator);
        let page_url = self.session.goto(&locator).await?.clone();

        let season = self
            .session
            .text_of(self.list_parser.season_title_selector())?
            .ok_or_else(|| {
                ParsingError::required_element_missing(self.list_parser.season_title_css(), page_url.as_str())
            })?;

        let list_parser = &self.list_parser;
        let context = ParseContext::new(page_url, page.path());
        let companies = self
            .session
            .evaluate(|document, _| list_parser.parse_with_context(document, &context))??;

        info!("Found {} companies in {}", companies.len(), season);
        outcome.summary.companies_found += companies.len();

        for company in companies {
            let name = company.display_name().to_string();
            match self.crawl_company(&season, company).await {
                Ok(entry) => {
                    info!("Data saved for {} ({} fields)", name, entry.fields.len());
                    outcome.data.push(entry);
                }
                Err(CompanyError::Empty { url }) => {
                    warn!("No data found for {} ({})", name, url);
                    outcome.summary.companies_empty += 1;
                }
                Err(e) => {
                    error!("Failed to scrape company {}: {}", name, e);
                    outcome.summary.companies_failed += 1;
                }
            }
        }

        Ok(())
    }

    async fn crawl_company(&mut self, season: &str, company: CompanyRef) -> Result<ScrapedEntry, CompanyError> {
        info!("Scraping company: {}", company.display_name());
        let link: Url = company.link.clone();
        self.session.goto(&link).await?;

        let detail_parser = &self.detail_parser;
        let context = DetailParseContext::new(link.clone()).with_company(company.name.clone());
        let fields = self
            .session
            .evaluate(|document, _| detail_parser.parse_with_context(document, &context))??;

        ScrapedEntry::try_new(season, company, fields).ok_or_else(|| CompanyError::Empty {
            url: link.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::browsing::{FetchedPage, NavigationResult};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    struct MapFetcher(HashMap<String, String>);

    #[async_trait]
    impl PageFetcher for MapFetcher {
        async fn fetch(&self, url: &Url) -> NavigationResult<FetchedPage> {
            match self.0.get(url.as_str()) {
                Some(body) => Ok(FetchedPage::new(url.clone(), body.clone())),
                None => Err(NavigationError::HttpStatus {
                    status: 404,
                    url: url.to_string(),
                }),
            }
        }
    }

    fn crawler(pages: &[(&str, &str)]) -> SeasonCrawler<MapFetcher> {
        let pages = pages.iter().map(|(u, b)| (u.to_string(), b.to_string())).collect();
        let session = BrowsingSession::new(MapFetcher(pages), Duration::from_secs(5));
        SeasonCrawler::new(session, &ParsingConfig::default()).unwrap()
    }

    fn site(paths: &[&str]) -> SiteConfig {
        SiteConfig {
            base_url: "https://shark.test".to_string(),
            season_paths: paths.iter().map(|p| ListingPageRef::new(*p)).collect(),
        }
    }

    #[tokio::test]
    async fn test_invalid_locator_skips_season() {
        let mut crawler = crawler(&[]);
        let site = SiteConfig {
            base_url: "not a url".to_string(),
            season_paths: vec![ListingPageRef::new("/season-1/")],
        };

        let outcome = crawler.run(&site).await;
        assert!(outcome.data.is_empty());
        assert_eq!(outcome.summary.seasons_skipped, 1);
    }

    #[tokio::test]
    async fn test_missing_title_skips_season() {
        let mut crawler = crawler(&[(
            "https://shark.test/season-1/",
            r#"<div class="ub-button-container"><a href="/a/"><span class="ub-button-block-btn">A</span></a></div>"#,
        )]);

        let outcome = crawler.run(&site(&["/season-1/"])).await;
        assert_eq!(outcome.summary.seasons_skipped, 1);
        assert_eq!(outcome.summary.companies_found, 0);
        assert!(outcome.data.is_empty());
    }

    #[tokio::test]
    async fn test_season_without_companies() {
        let mut crawler = crawler(&[(
            "https://shark.test/season-1/",
            r#"<h1 class="entry-title">Season 1</h1>"#,
        )]);

        let outcome = crawler.run(&site(&["/season-1/"])).await;
        assert_eq!(outcome.summary.seasons_skipped, 0);
        assert_eq!(outcome.summary.companies_found, 0);
        assert!(outcome.data.is_empty());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_saved_company_is_logged() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut crawler = crawler(&[
            (
                "https://shark.test/season-1/",
                r#"<h1 class="entry-title">Season 1</h1>
                   <div class="ub-button-container"><a href="/acme/"><span class="ub-button-block-btn">Acme</span></a></div>"#,
            ),
            (
                "https://shark.test/acme/",
                r#"<div class="entry-content"><ul><li><strong>Amount:</strong> 1 Cr</li></ul></div>"#,
            ),
        ]);
        let outcome = crawler.run(&site(&["/season-1/"])).await;
        assert_eq!(outcome.data.len(), 1);

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Data saved for Acme (1 fields)"));
    }
}
