//! Loader and lookup index for the precomputed movie table.
//!
//! The table file is tab-separated with one movie per line:
//! `tmdb_id \t title \t tags`. Row order is significant: row N of the table
//! corresponds to row N of the feature matrix.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::data::{DataError, Result};
use crate::models::MovieRecord;

/// The movie table plus a title lookup index.
///
/// Titles are expected to be unique; if a title occurs on several rows, the
/// first row wins for lookups and later rows stay reachable only by position.
#[derive(Debug)]
pub struct MovieTable {
    records: Vec<MovieRecord>,
    by_title: HashMap<String, usize>,
}

impl MovieTable {
    /// Parse the table from a tab-separated file
    pub fn load(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let mut parts = trimmed.splitn(3, '\t');

            let tmdb_id = parts.next().ok_or_else(|| DataError::Parse {
                file: file_name.clone(),
                line: line_no,
                reason: "Missing tmdb_id".to_string(),
            })?;
            let title = parts.next().ok_or_else(|| DataError::Parse {
                file: file_name.clone(),
                line: line_no,
                reason: "Missing title".to_string(),
            })?;
            let tags = parts.next().ok_or_else(|| DataError::Parse {
                file: file_name.clone(),
                line: line_no,
                reason: "Missing tags".to_string(),
            })?;

            records.push(MovieRecord {
                tmdb_id: tmdb_id.parse().map_err(|e| DataError::Parse {
                    file: file_name.clone(),
                    line: line_no,
                    reason: format!("Invalid tmdb_id: {}", e),
                })?,
                title: title.to_string(),
                tags: tags.to_string(),
            });
        }

        if records.is_empty() {
            return Err(DataError::Empty(file_name));
        }

        Ok(Self::from_records(records))
    }

    /// Build a table directly from records (tests and fixtures)
    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        let mut by_title = HashMap::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            // First occurrence wins for duplicate titles
            by_title.entry(record.title.clone()).or_insert(row);
        }
        Self { records, by_title }
    }

    /// Number of rows in the table
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve a title to its row position (exact, case-sensitive)
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.by_title.get(title).copied()
    }

    /// Whether the title exists in the table
    pub fn contains_title(&self, title: &str) -> bool {
        self.by_title.contains_key(title)
    }

    /// Get the record at a row position
    pub fn get(&self, row: usize) -> Option<&MovieRecord> {
        self.records.get(row)
    }

    /// All records in table order
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// All titles in table order (dropdown data)
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.title.as_str())
    }
}
