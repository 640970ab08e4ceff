//! Parsing error types for listing and detail page extraction

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Required element '{selector}' not found on {url}")]
    RequiredElementMissing { selector: String, url: String },

    #[error("URL resolution failed: {url} - {reason}")]
    UrlResolutionFailed {
        url: String,
        reason: String,
        base_url: Option<String>,
    },
}

impl ParsingError {
    /// Create an invalid selector error
    pub fn invalid_selector(selector: &str, reason: impl ToString) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a required element missing error
    pub fn required_element_missing(selector: &str, url: &str) -> Self {
        Self::RequiredElementMissing {
            selector: selector.to_string(),
            url: url.to_string(),
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
