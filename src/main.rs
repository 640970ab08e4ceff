//! Shark Tank India scraper entry point

#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing::{info, warn};

use shark_tank_scraper_lib::application::SeasonCrawler;
use shark_tank_scraper_lib::infrastructure::logging::log_system_info;
use shark_tank_scraper_lib::infrastructure::{
    init_logging_with_config, AppConfig, BrowsingSession, HttpFetcher, OutputWriter, WriteOutcome,
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging_with_config(&config.logging).context("Failed to initialize logging")?;
    log_system_info();

    let fetcher = HttpFetcher::new(&config.crawling)?;
    let session = BrowsingSession::new(fetcher, config.crawling.navigation_timeout());
    let mut crawler = SeasonCrawler::new(session, &config.parsing).context("Invalid parsing selectors")?;

    info!(
        "Scraping {} seasons from {}",
        config.site.season_paths.len(),
        config.site.base_url
    );
    let outcome = crawler.run(&config.site).await;

    let writer = OutputWriter::new(&config.output);
    match writer.write(&outcome.data).await.context("Failed to write output files")? {
        WriteOutcome::Written { records, .. } => {
            info!("Scraping completed, {} records written", records);
            Ok(ExitCode::SUCCESS)
        }
        WriteOutcome::Skipped if config.output.fail_on_empty => {
            warn!("No data scraped, exiting with failure status");
            Ok(ExitCode::FAILURE)
        }
        WriteOutcome::Skipped => Ok(ExitCode::SUCCESS),
    }
}
