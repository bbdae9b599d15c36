use anyhow::{anyhow, Result};

use super::utils::header_key;

/// A scraped table: header row plus body rows, one `String` per cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Index of the first column whose header matches `name`, ignoring case,
    /// whitespace and citation markers.
    pub fn column(&self, name: &str) -> Result<usize> {
        let want = header_key(name);
        self.headers
            .iter()
            .position(|h| header_key(h) == want)
            .ok_or_else(|| anyhow!("column {:?} not found in {:?}", name, self.headers))
    }

    /// Cell at `(row, col)`, empty when the row is short.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}
