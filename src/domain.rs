//! Domain module - scraped entities
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod listing;
pub mod record;

// Re-export commonly used items for convenience
pub use listing::{CompanyRef, ListingPageRef};
pub use record::{DetailRecord, ScrapedData, ScrapedEntry, COMPANY_KEY, LINK_KEY, SEASON_KEY};
