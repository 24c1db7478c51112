use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use super::model::{Dataset, Record};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Data sources
// ---------------------------------------------------------------------------

/// Something that can hand over the raw text of the dataset.
pub trait DataSource {
    /// Human readable location, used in logs and error messages.
    fn location(&self) -> String;

    /// Retrieve the complete resource text.
    fn fetch(&self) -> Result<String, LoadError>;

    /// Modification date of the resource as `YYYY-MM-DD`.
    fn last_modified(&self) -> Option<String> {
        None
    }
}

/// A CSV file on the local file system.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        fs::read_to_string(&self.path).map_err(|source| LoadError::Read {
            location: self.location(),
            source,
        })
    }

    fn last_modified(&self) -> Option<String> {
        let modified = fs::metadata(&self.path).ok()?.modified().ok()?;
        let date: DateTime<Local> = modified.into();
        Some(date.format("%Y-%m-%d").to_string())
    }
}

/// Text already held in memory.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    text: String,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        StaticSource {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl DataSource for StaticSource {
    fn location(&self) -> String {
        self.name.clone()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        Ok(self.text.clone())
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Retrieve and parse the dataset behind `source`.
pub fn load(source: &dyn DataSource) -> Result<Dataset> {
    let location = source.location();
    let text = source
        .fetch()
        .with_context(|| format!("retrieving dataset from {location}"))?;
    let mut dataset =
        parse_csv(&text).with_context(|| format!("parsing dataset from {location}"))?;
    dataset.last_updated = source.last_modified();
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse the minimal comma-separated dialect of the contaminant file.
///
/// * The first line holds the headers.
/// * Every following non-blank line is one record; values are matched to
///   headers by position.
/// * Headers and values are whitespace-trimmed.
/// * Quotes carry no meaning: a `"` is an ordinary character and every comma
///   splits, even one a writer meant to be quoted.
pub fn parse_csv(text: &str) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = reader.records();

    let headers: Vec<String> = match rows.next() {
        Some(row) => row?.iter().map(str::to_string).collect(),
        None => return Ok(Dataset::default()),
    };

    let mut records = Vec::new();
    for row in rows {
        let row = row?;
        if is_blank(&row) {
            continue;
        }
        records.push(Record::from_row(&headers, row.iter()));
    }

    log::debug!(
        "Parsed {} records with headers {:?}",
        records.len(),
        headers
    );
    Ok(Dataset::new(headers, records))
}

/// A whitespace-only line comes back as a single empty field.
fn is_blank(row: &csv::StringRecord) -> bool {
    row.len() == 1 && row.get(0).is_some_and(str::is_empty)
}
