//! Shark Tank India scraper
//!
//! Crawls the season listing pages of a Shark Tank India fan site, follows
//! every company button to its detail page, extracts the label/value facts
//! listed there and exports the result as JSON and CSV.

// Module declarations
pub mod domain;
pub mod application;
pub mod infrastructure;
