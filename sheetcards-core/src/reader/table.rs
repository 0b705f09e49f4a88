//! Table data structures

use serde::Serialize;
use std::fmt;

/// A loaded order sheet: trimmed header names plus data rows.
///
/// Every row holds exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table, trimming header names and fitting every row to the header width.
    ///
    /// Short rows are padded with [`CellValue::Missing`]; extra cells are dropped.
    /// Loaders reject over-long rows before reaching this point.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Missing);
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Number of data rows (the header row is not counted)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a row by its 0-based ordinal
    pub fn row(&self, ordinal: usize) -> Option<&[CellValue]> {
        self.rows.get(ordinal).map(Vec::as_slice)
    }
}

/// Cell value types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// No value at all (empty field or a configured missing marker)
    Missing,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Check if the cell has no value
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Missing, or text that is exactly empty. Whitespace-only text is not blank.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Text(text) => text.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Get the text if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Text(text) => f.write_str(text),
            CellValue::Number(n) => write!(f, "{}", n),
        }
    }
}
