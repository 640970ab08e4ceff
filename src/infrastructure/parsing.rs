//! HTML parsing infrastructure
//!
//! Trait-based parsers for season listing pages and company detail pages,
//! driven by configurable CSS selectors.

pub mod error;
pub mod company_list_parser;
pub mod company_detail_parser;
pub mod context;
pub mod config;

// Re-export public types
pub use error::{ParsingError, ParsingResult};
pub use context::{DetailParseContext, ParseContext};
pub use config::{DetailSelectors, ListingSelectors, ParsingConfig};
pub use company_list_parser::CompanyListParser;
pub use company_detail_parser::CompanyDetailParser;

use scraper::{Html, Selector};

/// Parser trait with context support
pub trait ContextualParser {
    type Output;
    type Context;

    /// Parse HTML with contextual information
    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output>;
}

/// Compile a selector string, keeping the source text in the error
pub(crate) fn compile_selector(selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector).map_err(|e| ParsingError::invalid_selector(selector, e))
}
