//! Scraped records and the aggregate they are collected into.
//!
//! Detail pages carry no fixed schema: whatever labels a page lists become
//! keys. Records are therefore ordered string maps rather than structs, and
//! the tabular export derives its columns from the union of all keys.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize, Serializer};
use url::Url;

use super::listing::CompanyRef;

/// Provenance key holding the season title
pub const SEASON_KEY: &str = "Season";
/// Provenance key holding the company button label
pub const COMPANY_KEY: &str = "Company";
/// Provenance key holding the detail page link
pub const LINK_KEY: &str = "Link";

/// Fields extracted from one detail page, in first-seen label order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetailRecord(IndexMap<String, String>);

impl DetailRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a field. A repeated label overwrites the earlier value but
    /// keeps the label's original position.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(label.into(), value.into())
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.0.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DetailRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (label, value) in iter {
            record.insert(label, value);
        }
        record
    }
}

/// One company's provenance merged with its extracted fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedEntry {
    pub season: String,
    pub company: Option<String>,
    pub link: Url,
    pub fields: DetailRecord,
}

impl ScrapedEntry {
    /// Build an entry; `None` when the detail page yielded no fields,
    /// which the crawl treats as an extraction failure.
    pub fn try_new(season: impl Into<String>, company: CompanyRef, fields: DetailRecord) -> Option<Self> {
        if fields.is_empty() {
            return None;
        }
        Some(Self {
            season: season.into(),
            company: company.name,
            link: company.link,
            fields,
        })
    }

    /// Flat record: `Season`, `Company` (only when known), `Link`, then the
    /// extracted fields. A field whose label collides with a provenance key
    /// replaces that value in place; a `Company` field on an unnamed entry
    /// still takes the second slot.
    pub fn flatten(&self) -> IndexMap<String, String> {
        let mut record = IndexMap::with_capacity(self.fields.len() + 3);
        record.insert(SEASON_KEY.to_string(), self.season.clone());
        if let Some(company) = self.company.as_deref().or_else(|| self.fields.get(COMPANY_KEY)) {
            record.insert(COMPANY_KEY.to_string(), company.to_string());
        }
        record.insert(LINK_KEY.to_string(), self.link.to_string());
        for (label, value) in self.fields.iter() {
            record.insert(label.to_string(), value.to_string());
        }
        record
    }
}

impl Serialize for ScrapedEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.flatten().serialize(serializer)
    }
}

/// Every successfully scraped entry, in crawl order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScrapedData {
    entries: Vec<ScrapedEntry>,
}

impl ScrapedData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ScrapedEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ScrapedEntry] {
        &self.entries
    }

    /// Flattened records in crawl order
    pub fn records(&self) -> Vec<IndexMap<String, String>> {
        self.entries.iter().map(ScrapedEntry::flatten).collect()
    }

    /// Union of all record keys, in the order they are first encountered.
    /// The provenance columns always lead, `Company` included even when no
    /// entry has one.
    pub fn columns(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return Vec::new();
        }
        let mut columns: IndexSet<String> = [SEASON_KEY, COMPANY_KEY, LINK_KEY].iter().map(|k| k.to_string()).collect();
        for entry in &self.entries {
            for key in entry.flatten().into_keys() {
                columns.insert(key);
            }
        }
        columns.into_iter().collect()
    }
}

impl FromIterator<ScrapedEntry> for ScrapedData {
    fn from_iter<I: IntoIterator<Item = ScrapedEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
