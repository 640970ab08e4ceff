//! Parsing configuration for HTML extraction
//!
//! Centralized configuration for CSS selectors.

use serde::{Deserialize, Serialize};

/// Main parsing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Season listing page selectors
    pub listing: ListingSelectors,

    /// Company detail page selectors
    pub detail: DetailSelectors,
}

/// CSS selectors for season listing pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSelectors {
    /// Season heading; a listing page without it is unusable
    pub season_title: String,

    /// One container per company button
    pub company_container: String,

    /// Button label inside a container
    pub company_name: String,

    /// Anchor inside a container
    pub company_link: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            season_title: "h1.entry-title".to_string(),
            company_container: ".ub-button-container".to_string(),
            company_name: ".ub-button-block-btn".to_string(),
            company_link: "a".to_string(),
        }
    }
}

/// CSS selectors for company detail pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailSelectors {
    /// List items inside the content region
    pub field_item: String,

    /// Emphasized label inside a list item
    pub field_label: String,
}

impl Default for DetailSelectors {
    fn default() -> Self {
        Self {
            field_item: ".entry-content li".to_string(),
            field_label: "strong".to_string(),
        }
    }
}
