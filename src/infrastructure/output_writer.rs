//! JSON and CSV export of the scraped aggregate

#![allow(clippy::uninlined_format_args)]

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::domain::ScrapedData;
use crate::infrastructure::config::OutputConfig;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to serialize JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to build CSV output: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// What the writer did with the aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Nothing was scraped, no file was touched
    Skipped,
    Written { json: PathBuf, csv: PathBuf, records: usize },
}

/// Writes the aggregate as a pretty JSON array and a CSV table
pub struct OutputWriter {
    json_path: PathBuf,
    csv_path: PathBuf,
}

impl OutputWriter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            json_path: config.json_path.clone(),
            csv_path: config.csv_path.clone(),
        }
    }

    /// Write both files, overwriting existing ones. An empty aggregate
    /// writes nothing and is not an error.
    pub async fn write(&self, data: &ScrapedData) -> OutputResult<WriteOutcome> {
        if data.is_empty() {
            info!("No data scraped, skipping output files");
            return Ok(WriteOutcome::Skipped);
        }

        let json = render_json(data)?;
        write_file(&self.json_path, json.as_bytes()).await?;
        info!("Data saved to {}", self.json_path.display());

        let csv = render_csv(data)?;
        write_file(&self.csv_path, &csv).await?;
        info!("Data saved to {}", self.csv_path.display());

        Ok(WriteOutcome::Written {
            json: self.json_path.clone(),
            csv: self.csv_path.clone(),
            records: data.len(),
        })
    }
}

/// JSON array of flattened records, two-space indented
pub fn render_json(data: &ScrapedData) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// CSV with the union of all record keys as header, in first-seen order.
/// Columns a record lacks are left blank.
pub fn render_csv(data: &ScrapedData) -> OutputResult<Vec<u8>> {
    let columns = data.columns();
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns)?;

    for record in data.records() {
        writer.write_record(
            columns
                .iter()
                .map(|column| record.get(column).map(String::as_str).unwrap_or("")),
        )?;
    }

    writer
        .into_inner()
        .map_err(|e| OutputError::Csv(csv::Error::from(e.into_error())))
}

async fn write_file(path: &Path, contents: &[u8]) -> OutputResult<()> {
    tokio::fs::write(path, contents).await.map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}
