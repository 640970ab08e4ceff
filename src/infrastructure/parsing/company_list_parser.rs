//! Company list parser for season listing pages
//!
//! Each company on a listing page is rendered as a button container holding
//! a label element and an anchor. Containers without a usable link are
//! dropped; an empty result is valid.

#![allow(clippy::uninlined_format_args)]

use super::{compile_selector, ContextualParser, ListingSelectors, ParseContext, ParsingError, ParsingResult};
use crate::domain::CompanyRef;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Parser for extracting company buttons from listing pages
pub struct CompanyListParser {
    season_title_selector: Selector,
    container_selector: Selector,
    name_selector: Selector,
    link_selector: Selector,
    /// Source text of the title selector, for error messages
    season_title_css: String,
}

impl CompanyListParser {
    /// Create a new company list parser with default selectors
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&ListingSelectors::default())
    }

    /// Create parser with custom selector configuration
    pub fn with_config(selectors: &ListingSelectors) -> ParsingResult<Self> {
        Ok(Self {
            season_title_selector: compile_selector(&selectors.season_title)?,
            container_selector: compile_selector(&selectors.company_container)?,
            name_selector: compile_selector(&selectors.company_name)?,
            link_selector: compile_selector(&selectors.company_link)?,
            season_title_css: selectors.season_title.clone(),
        })
    }

    /// Selector of the season heading
    pub fn season_title_selector(&self) -> &Selector {
        &self.season_title_selector
    }

    pub fn season_title_css(&self) -> &str {
        &self.season_title_css
    }

    /// Extract the label text of a container; `None` when there is no label
    /// element, an empty string when the label element is blank
    fn extract_name(&self, container: &ElementRef) -> Option<String> {
        container
            .select(&self.name_selector)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
    }

    /// Resolve the container's anchor target against the page URL
    fn extract_link(&self, container: &ElementRef, page_url: &Url) -> Option<Url> {
        let href = container.select(&self.link_selector).next()?.value().attr("href")?;
        match resolve_link(href, page_url) {
            Ok(link) => Some(link),
            Err(e) => {
                warn!("Skipping unresolvable company link: {}", e);
                None
            }
        }
    }
}

impl ContextualParser for CompanyListParser {
    type Output = Vec<CompanyRef>;
    type Context = ParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        debug!("Parsing company list for season {}", context.season_path);

        let mut companies = Vec::new();
        for (index, container) in html.select(&self.container_selector).enumerate() {
            let name = self.extract_name(&container);
            match self.extract_link(&container, &context.page_url) {
                Some(link) => companies.push(CompanyRef::new(name, link)),
                None => debug!(
                    "Dropping company button {} without link (label: {:?})",
                    index, name
                ),
            }
        }

        debug!(
            "Extracted {} companies from {}",
            companies.len(),
            context.page_url
        );
        Ok(companies)
    }
}

/// Resolve an `href` the way a browser does for `anchor.href`
fn resolve_link(href: &str, page_url: &Url) -> ParsingResult<Url> {
    page_url.join(href).map_err(|e| ParsingError::UrlResolutionFailed {
        url: href.to_string(),
        reason: e.to_string(),
        base_url: Some(page_url.to_string()),
    })
}
