//! Configuration infrastructure
//!
//! Contains configuration loading for the season scraper.
//!
//! Configuration is layered, later sources overriding earlier ones:
//! 1. Built-in defaults (the fixed site layout the scraper was written for)
//! 2. Optional config file (`config/scraper.toml`, `.json` or `.yaml`)
//! 3. Environment variables (`SCRAPER_<SECTION>__<KEY>`)
//!
//! Without a file or variables the scraper runs with the defaults only.

#![allow(clippy::uninlined_format_args)]

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::domain::ListingPageRef;
use crate::infrastructure::parsing::ParsingConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {source}")]
    Load {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

impl ConfigError {
    fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Target site and the season listing pages to visit
    pub site: SiteConfig,

    /// Navigation behaviour
    pub crawling: CrawlingConfig,

    /// CSS selectors for listing and detail pages
    pub parsing: ParsingConfig,

    /// Output files and exit policy
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Target site settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL, without trailing slash
    pub base_url: String,

    /// Season listing pages, visited in this order
    pub season_paths: Vec<ListingPageRef>,
}

/// Navigation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlingConfig {
    /// Upper bound for a single page navigation, in seconds
    pub navigation_timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// Maximum redirects followed per navigation
    pub max_redirects: usize,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JSON output file
    pub json_path: PathBuf,

    /// CSV output file
    pub csv_path: PathBuf,

    /// Exit non-zero when nothing was scraped (default keeps exit 0)
    pub fail_on_empty: bool,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs (file output only)
    pub json_format: bool,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files
    pub log_dir: PathBuf,

    /// Log file name inside `log_dir`
    pub file_name: String,

    /// Module-specific log level filters (e.g., "reqwest": "warn")
    pub module_filters: HashMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: shark_tank_india::BASE_URL.to_string(),
            season_paths: shark_tank_india::SEASON_PATHS
                .iter()
                .map(|path| ListingPageRef::new(*path))
                .collect(),
        }
    }
}

impl Default for CrawlingConfig {
    fn default() -> Self {
        Self {
            navigation_timeout_secs: defaults::NAVIGATION_TIMEOUT_SECONDS,
            user_agent: defaults::USER_AGENT.to_string(),
            max_redirects: defaults::MAX_REDIRECTS,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: PathBuf::from(defaults::JSON_OUTPUT_FILE),
            csv_path: PathBuf::from(defaults::CSV_OUTPUT_FILE),
            fail_on_empty: defaults::FAIL_ON_EMPTY,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: PathBuf::from(defaults::LOG_DIR),
            file_name: defaults::LOG_FILE_NAME.to_string(),
            module_filters: {
                let mut filters = HashMap::new();
                filters.insert("reqwest".to_string(), "info".to_string());
                filters.insert("hyper".to_string(), "warn".to_string());
                filters.insert("html5ever".to_string(), "warn".to_string());
                filters.insert("selectors".to_string(), "warn".to_string());
                filters
            },
        }
    }
}

impl CrawlingConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }
}

impl AppConfig {
    /// Load from the default config file location and process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(defaults::CONFIG_FILE, Self::environment())
    }

    /// Load from a config file (extension optional, file optional) layered
    /// under the given environment source
    pub fn load_from(path: &str, environment: config::Environment) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(environment)
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        info!("Loaded configuration (file: {}, seasons: {})", path, config.site.season_paths.len());
        Ok(config)
    }

    /// Environment source: `SCRAPER_OUTPUT__FAIL_ON_EMPTY=true`,
    /// `SCRAPER_SITE__SEASON_PATHS=/season-1/,/season-4/`
    pub fn environment() -> config::Environment {
        config::Environment::with_prefix(defaults::ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("site.season_paths")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.site.base_url).map_err(|e| {
            ConfigError::validation(format!("site.base_url '{}' is not a valid URL: {}", self.site.base_url, e))
        })?;

        if self.crawling.navigation_timeout_secs == 0 {
            return Err(ConfigError::validation("crawling.navigation_timeout_secs must be greater than 0"));
        }

        if self.output.json_path.as_os_str().is_empty() || self.output.csv_path.as_os_str().is_empty() {
            return Err(ConfigError::validation("output paths must not be empty"));
        }

        if self.output.json_path == self.output.csv_path {
            return Err(ConfigError::validation("output.json_path and output.csv_path must differ"));
        }

        Ok(())
    }
}

/// Shark Tank India fan-club site layout
pub mod shark_tank_india {
    /// Base URL of the site
    pub const BASE_URL: &str = "https://www.sharktankindiaclub.com";

    /// Season listing pages. The site publishes seasons 2 and 3 under
    /// non-obvious slugs.
    pub const SEASON_PATHS: &[&str] = &[
        "/season-1/",
        "/sample-page/",                      // Season 2
        "/shark-tank-india-unseen-pitches/",  // Season 3
        "/season-4/",
    ];
}

/// Default configuration values
pub mod defaults {
    /// Config file looked up relative to the working directory
    pub const CONFIG_FILE: &str = "config/scraper";

    /// Environment variable prefix
    pub const ENV_PREFIX: &str = "SCRAPER";

    /// Default navigation timeout in seconds
    pub const NAVIGATION_TIMEOUT_SECONDS: u64 = 120;

    /// Default user agent
    pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

    /// Default redirect limit
    pub const MAX_REDIRECTS: usize = 10;

    /// Default JSON output file
    pub const JSON_OUTPUT_FILE: &str = "shark_tank_data.json";

    /// Default CSV output file
    pub const CSV_OUTPUT_FILE: &str = "shark_tank_data.csv";

    /// Default exit policy on an empty scrape
    pub const FAIL_ON_EMPTY: bool = false;

    // Log configuration defaults
    /// Default log level
    pub const LOG_LEVEL: &str = "info";

    /// Default JSON format setting
    pub const LOG_JSON_FORMAT: bool = false;

    /// Default console output setting
    pub const LOG_CONSOLE_OUTPUT: bool = true;

    /// Default file output setting
    pub const LOG_FILE_OUTPUT: bool = false;

    /// Default log directory
    pub const LOG_DIR: &str = "logs";

    /// Default log file name
    pub const LOG_FILE_NAME: &str = "scraper.log";
}
