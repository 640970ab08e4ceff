//! Application layer module
//!
//! This module contains the crawl loop that orchestrates the browsing
//! session and the parsers.

pub mod season_crawler;
pub mod crawl_summary;

pub use season_crawler::{CompanyError, CrawlOutcome, SeasonCrawler, SeasonError};
pub use crawl_summary::CrawlSummary;
