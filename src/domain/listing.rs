//! Listing-side entities: season listing pages and the companies found on them.

use serde::{Deserialize, Serialize};
use url::Url;

/// Relative path of one season's listing page (e.g. `/season-1/`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingPageRef(String);

impl ListingPageRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }

    /// Absolute locator of the listing page.
    ///
    /// The path is appended to the base URL verbatim, so `base_url` is
    /// expected without a trailing slash and paths with a leading one.
    pub fn locate(&self, base_url: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}{}", base_url, self.0))
    }
}

impl std::fmt::Display for ListingPageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListingPageRef {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// A company button on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRef {
    /// Button label, absent when the button has no label element
    pub name: Option<String>,
    /// Resolved detail page link, always present
    pub link: Url,
}

impl CompanyRef {
    pub fn new(name: Option<String>, link: Url) -> Self {
        Self { name, link }
    }

    /// Name for log lines; falls back to the link when the label is missing
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.link.as_str())
    }
}
