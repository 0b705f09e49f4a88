//! Delimited text (CSV/TSV) reader

use super::table::{CellValue, Table};
use crate::config::LoaderConfig;
use crate::error::ReadError;
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;
use tracing::debug;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Read a delimited text file into a table
pub fn read_delimited(path: &Path, delimiter: u8, config: &LoaderConfig) -> Result<Table, ReadError> {
    let bytes = fs::read(path)?;
    let text = decode(&bytes, &config.encodings)?;
    parse_delimited(&text, delimiter, &config.missing_markers)
}

/// Decode bytes with the first encoding that accepts them without replacement characters
pub fn decode(bytes: &[u8], encodings: &[String]) -> Result<String, ReadError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    for label in encodings {
        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| ReadError::UnknownEncoding(label.clone()))?;

        match encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            Some(text) => {
                debug!(encoding = encoding.name(), "decoded input");
                return Ok(text.into_owned());
            }
            None => debug!(encoding = encoding.name(), "input rejected by encoding"),
        }
    }

    Err(ReadError::Decode {
        tried: encodings.join(", "),
    })
}

/// Parse decoded text; the first record is the header row.
///
/// Short records are padded with missing values, long records are rejected.
/// Blank lines are skipped. A column holds numbers only when every one of its
/// non-missing fields parses as a number; otherwise its fields stay text.
pub fn parse_delimited(
    text: &str,
    delimiter: u8,
    missing_markers: &[String],
) -> Result<Table, ReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        // Headers are handled here so that ragged rows report their own line.
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(malformed)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect(),
        None => return Ok(Table::default()),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(malformed)?;
        if record.len() > headers.len() {
            return Err(ReadError::Malformed {
                line: record.position().map_or(0, |p| p.line()),
                reason: format!("expected {} fields, saw {}", headers.len(), record.len()),
            });
        }
        rows.push(
            record
                .iter()
                .map(|field| parse_field(field, missing_markers))
                .collect(),
        );
    }

    let mut table = Table::new(headers, rows);
    for column in 0..table.column_count() {
        promote_numeric_column(&mut table.rows, column);
    }

    debug!(columns = table.column_count(), rows = table.row_count(), "parsed delimited text");
    Ok(table)
}

/// Classify one raw field as missing or text kept verbatim
fn parse_field(raw: &str, missing_markers: &[String]) -> CellValue {
    if missing_markers.iter().any(|marker| marker == raw) {
        CellValue::Missing
    } else {
        CellValue::Text(raw.to_string())
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Turn a column into numbers if all of its non-missing cells parse; all-missing columns are left alone
fn promote_numeric_column(rows: &mut [Vec<CellValue>], column: usize) {
    let mut numbers = Vec::with_capacity(rows.len());
    for row in rows.iter() {
        match &row[column] {
            CellValue::Missing => numbers.push(None),
            CellValue::Text(text) => match parse_number(text) {
                Some(n) => numbers.push(Some(n)),
                None => return,
            },
            CellValue::Number(n) => numbers.push(Some(*n)),
        }
    }
    if numbers.iter().all(Option::is_none) {
        return;
    }

    for (row, number) in rows.iter_mut().zip(numbers) {
        if let Some(n) = number {
            row[column] = CellValue::Number(n);
        }
    }
}

fn malformed(err: csv::Error) -> ReadError {
    ReadError::Malformed {
        line: err.position().map_or(0, |p| p.line()),
        reason: err.to_string(),
    }
}
