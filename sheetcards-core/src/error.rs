//! Error types for loading and rendering order sheets

use thiserror::Error;

/// The input file could not be turned into a table
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Every configured encoding rejected the input bytes
    #[error("could not decode the file with any of the encodings: {tried}")]
    Decode { tried: String },

    #[error("unknown text encoding '{0}'")]
    UnknownEncoding(String),

    #[error("malformed table at line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    #[error("{0}")]
    Workbook(#[from] calamine::Error),

    #[error("workbook has no sheet named '{0}'")]
    NoSheet(String),
}

/// The table is well formed but has no data rows
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("the table has no data rows")]
pub struct EmptyTableError;

/// The requested row range cannot be displayed
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("the start row ({start}) cannot be greater than the end row ({end})")]
    Inverted { start: usize, end: usize },

    #[error("row {row} is outside the table (valid rows are 1 to {max})")]
    OutOfBounds { row: usize, max: usize },
}

/// Any failure of one render pass
#[derive(Debug, Error)]
pub enum CardError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    EmptyTable(#[from] EmptyTableError),

    #[error(transparent)]
    Range(#[from] RangeError),
}
