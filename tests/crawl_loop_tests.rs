//! Crawl loop behaviour against an in-memory site
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

use shark_tank_scraper_lib::application::SeasonCrawler;
use shark_tank_scraper_lib::domain::ListingPageRef;
use shark_tank_scraper_lib::infrastructure::config::SiteConfig;
use shark_tank_scraper_lib::infrastructure::{
    BrowsingSession, FetchedPage, NavigationError, NavigationResult, PageFetcher, ParsingConfig,
};

const BASE: &str = "https://shark.test";

/// Serves canned pages and records every navigation
struct FakeSite {
    pages: HashMap<String, String>,
    visits: Arc<Mutex<Vec<String>>>,
}

impl FakeSite {
    fn new(pages: &[(&str, String)]) -> Self {
        Self {
            pages: pages.iter().map(|(p, b)| (format!("{}{}", BASE, p), b.clone())).collect(),
            visits: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl PageFetcher for FakeSite {
    async fn fetch(&self, url: &Url) -> NavigationResult<FetchedPage> {
        self.visits.lock().unwrap().push(url.to_string());
        match self.pages.get(url.as_str()) {
            Some(body) => Ok(FetchedPage::new(url.clone(), body.clone())),
            None => Err(NavigationError::Request {
                url: url.to_string(),
                message: "connection reset".to_string(),
            }),
        }
    }
}

fn listing(title: &str, companies: &[(&str, &str)]) -> String {
    let buttons: String = companies
        .iter()
        .map(|(name, href)| {
            format!(
                r#"<div class="ub-button-container"><a href="{}"><span class="ub-button-block-btn">{}</span></a></div>"#,
                href, name
            )
        })
        .collect();
    format!(
        r#"<html><body><h1 class="entry-title">{}</h1><div class="entry-content">{}</div></body></html>"#,
        title, buttons
    )
}

fn detail(fields: &[(&str, &str)]) -> String {
    let items: String = fields
        .iter()
        .map(|(label, value)| format!("<li><strong>{}:</strong> {}</li>", label, value))
        .collect();
    format!(r#"<html><body><div class="entry-content"><ul>{}</ul></div></body></html>"#, items)
}

fn site(paths: &[&str]) -> SiteConfig {
    SiteConfig {
        base_url: BASE.to_string(),
        season_paths: paths.iter().map(|p| ListingPageRef::new(*p)).collect(),
    }
}

async fn crawl(fake: FakeSite, paths: &[&str]) -> shark_tank_scraper_lib::application::CrawlOutcome {
    let session = BrowsingSession::new(fake, Duration::from_secs(5));
    let mut crawler = SeasonCrawler::new(session, &ParsingConfig::default()).unwrap();
    crawler.run(&site(paths)).await
}

#[tokio::test]
async fn failing_company_is_skipped_and_order_is_kept() {
    let fake = FakeSite::new(&[
        ("/season-1/", listing("Season 1", &[("Alpha", "/alpha/"), ("Beta", "/beta/"), ("Gamma", "/gamma/")])),
        ("/alpha/", detail(&[("Amount", "50 Lakhs")])),
        ("/gamma/", detail(&[("Amount", "1 Cr"), ("Deal", "Yes")])),
    ]);

    let outcome = crawl(fake, &["/season-1/"]).await;

    let records = outcome.data.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Company"], "Alpha");
    assert_eq!(records[1]["Company"], "Gamma");
    assert_eq!(records[1]["Season"], "Season 1");
    assert_eq!(records[1]["Link"], "https://shark.test/gamma/");
    assert_eq!(records[1]["Deal"], "Yes");

    assert_eq!(outcome.summary.companies_found, 3);
    assert_eq!(outcome.summary.companies_failed, 1);
    assert_eq!(outcome.summary.entries, 2);
}

#[tokio::test]
async fn failing_season_does_not_stop_later_seasons() {
    let fake = FakeSite::new(&[
        ("/season-2/", listing("Season 2", &[("Delta", "/delta/")])),
        ("/delta/", detail(&[("Equity", "5%")])),
    ]);

    let outcome = crawl(fake, &["/season-1/", "/season-2/"]).await;

    assert_eq!(outcome.data.len(), 1);
    assert_eq!(outcome.data.entries()[0].season, "Season 2");
    assert_eq!(outcome.summary.seasons_attempted, 2);
    assert_eq!(outcome.summary.seasons_skipped, 1);
}

#[tokio::test]
async fn empty_detail_page_is_skipped() {
    let fake = FakeSite::new(&[
        ("/season-1/", listing("Season 1", &[("Quiet", "/quiet/"), ("Loud", "/loud/")])),
        ("/quiet/", detail(&[])),
        ("/loud/", detail(&[("Ask", "1 Cr for 2%")])),
    ]);

    let outcome = crawl(fake, &["/season-1/"]).await;

    assert_eq!(outcome.data.len(), 1);
    assert_eq!(outcome.data.records()[0]["Company"], "Loud");
    assert_eq!(outcome.summary.companies_empty, 1);
    assert_eq!(outcome.summary.companies_failed, 0);
}

#[tokio::test]
async fn pages_are_visited_in_declared_order() {
    let fake = FakeSite::new(&[
        ("/s1/", listing("S1", &[("A", "/a/"), ("B", "/b/")])),
        ("/s2/", listing("S2", &[("C", "/c/")])),
        ("/a/", detail(&[("X", "1")])),
        ("/b/", detail(&[("X", "2")])),
        ("/c/", detail(&[("X", "3")])),
    ]);

    let visits = Arc::clone(&fake.visits);
    let outcome = crawl(fake, &["/s1/", "/s2/"]).await;

    let visits = visits.lock().unwrap().clone();
    assert_eq!(
        visits,
        vec![
            "https://shark.test/s1/",
            "https://shark.test/a/",
            "https://shark.test/b/",
            "https://shark.test/s2/",
            "https://shark.test/c/",
        ]
    );
    let values: Vec<String> = outcome.data.records().iter().map(|r| r["X"].clone()).collect();
    assert_eq!(values, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn every_entry_has_link_and_fields() {
    let fake = FakeSite::new(&[
        (
            "/season-1/",
            format!(
                "{}{}",
                listing("Season 1", &[("Kept", "/kept/")]),
                r#"<div class="ub-button-container"><span class="ub-button-block-btn">No link</span></div>"#
            ),
        ),
        ("/kept/", detail(&[("Amount", "10 Lakhs")])),
    ]);

    let outcome = crawl(fake, &["/season-1/"]).await;

    assert_eq!(outcome.summary.companies_found, 1);
    for entry in outcome.data.entries() {
        assert!(!entry.link.as_str().is_empty());
        assert!(!entry.fields.is_empty());
    }
}

#[tokio::test]
async fn blank_season_title_still_crawls_companies() {
    let fake = FakeSite::new(&[
        ("/season-1/", listing("   ", &[("Alpha", "/alpha/")])),
        ("/alpha/", detail(&[("Amount", "50 Lakhs")])),
    ]);

    let outcome = crawl(fake, &["/season-1/"]).await;

    assert_eq!(outcome.summary.seasons_skipped, 0);
    assert_eq!(outcome.data.len(), 1);
    let records = outcome.data.records();
    assert_eq!(records[0]["Season"], "");
    assert_eq!(records[0]["Company"], "Alpha");
}
