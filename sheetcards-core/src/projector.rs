//! Row projection: the label/value pairs shown for one row

use crate::card::ProjectedField;
use crate::headers::{COLLECTION_POINT_LABEL, COLLECTION_TIME_LABEL, KnownHeaders};
use crate::range::display_number;
use crate::reader::CellValue;

/// Display name and visible fields of one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub name: String,
    pub fields: Vec<ProjectedField>,
}

/// Project a row into its display name and non-blank fields.
///
/// The first column holds the name and is never emitted as a field. Field
/// order follows column order, minus the excluded order-confirmed column.
pub fn project_row(
    row: &[CellValue],
    headers: &[String],
    ordinal: usize,
    columns: &KnownHeaders,
) -> Projection {
    let name = match row.first() {
        Some(CellValue::Text(name)) => name.clone(),
        _ => format!("Row {}", display_number(ordinal)),
    };

    let fields = headers
        .iter()
        .zip(row)
        .skip(1)
        .filter_map(|(header, value)| {
            let label = column_label(header, columns)?;
            if value.is_blank() {
                return None;
            }
            Some(ProjectedField::new(label, value.to_string()))
        })
        .collect();

    Projection { name, fields }
}

/// Card label for a column header, or `None` when the column is never shown
pub fn column_label<'a>(header: &'a str, columns: &KnownHeaders) -> Option<&'a str> {
    let header = header.trim();
    if header == columns.collection_point {
        Some(COLLECTION_POINT_LABEL)
    } else if columns.collection_time.iter().any(|name| name == header) {
        Some(COLLECTION_TIME_LABEL)
    } else if header == columns.order_confirmed {
        None
    } else {
        Some(header)
    }
}
