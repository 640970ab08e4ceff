//! Infrastructure layer for page fetching, parsing, output and configuration
//!
//! This module provides the browsing session and its HTTP transport, HTML
//! parsers, file export, configuration loading and logging setup.

pub mod parsing_error;  // Parsing error types
pub mod parsing;  // Selector-driven page parsers
pub mod browsing;  // Browsing session over a page fetcher
pub mod http_fetcher;  // reqwest page fetcher
pub mod output_writer;  // JSON/CSV export
pub mod config;  // Configuration constants and loading
pub mod logging;  // Logging infrastructure

// Re-export commonly used items
pub use config::{shark_tank_india, AppConfig, ConfigError};
pub use parsing::{CompanyDetailParser, CompanyListParser, ParsingConfig, ParsingError, ParsingResult};
pub use browsing::{BrowsingSession, FetchedPage, NavigationError, NavigationResult, PageFetcher};
pub use http_fetcher::HttpFetcher;
pub use output_writer::{OutputError, OutputWriter, WriteOutcome};
pub use logging::init_logging_with_config;
