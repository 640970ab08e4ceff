//! Per-run counters for the crawl

use serde::Serialize;
use tracing::info;

/// Outcome counts of one crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlSummary {
    pub seasons_attempted: usize,
    /// Listing pages that failed to load or had no season title
    pub seasons_skipped: usize,
    pub companies_found: usize,
    /// Detail pages that failed to load
    pub companies_failed: usize,
    /// Detail pages that loaded but yielded no fields
    pub companies_empty: usize,
    pub entries: usize,
}

impl CrawlSummary {
    pub fn seasons_scraped(&self) -> usize {
        self.seasons_attempted - self.seasons_skipped
    }

    pub fn companies_skipped(&self) -> usize {
        self.companies_failed + self.companies_empty
    }

    pub fn log(&self) {
        info!(
            "Crawl finished: {}/{} seasons, {} companies found, {} scraped, {} failed, {} empty",
            self.seasons_scraped(),
            self.seasons_attempted,
            self.companies_found,
            self.entries,
            self.companies_failed,
            self.companies_empty
        );
    }
}
