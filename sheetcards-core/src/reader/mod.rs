//! Order sheet readers for delimited text and spreadsheet workbooks

use crate::config::LoaderConfig;
use crate::error::ReadError;
use std::path::Path;
use tracing::info;

pub mod delimited;
pub mod table;
pub mod workbook;

pub use table::{CellValue, Table};

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Read a table from a file path.
///
/// Workbooks are recognised by extension; anything else is read as delimited
/// text, with tabs for `.tsv` files and the configured delimiter otherwise.
pub fn read_table<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> Result<Table, ReadError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let table = if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        workbook::read_workbook(path, config.sheet.as_deref())?
    } else {
        let delimiter = if extension == "tsv" {
            b'\t'
        } else {
            config.delimiter as u8
        };
        delimited::read_delimited(path, delimiter, config)?
    };

    info!(
        path = %path.display(),
        columns = table.column_count(),
        rows = table.row_count(),
        "loaded table"
    );
    Ok(table)
}
