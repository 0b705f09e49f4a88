//! Excel/ODS workbook reader using calamine

use super::table::{CellValue, Table};
use crate::error::ReadError;
use calamine::{Data, ExcelDateTime, Range, Reader, Sheets, open_workbook_auto};
use std::path::Path;
use tracing::debug;

/// Read one sheet of a workbook into a table; the first sheet when `sheet` is `None`
pub fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<Table, ReadError> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) if sheet_names.iter().any(|s| s == name) => name.to_string(),
        Some(name) => return Err(ReadError::NoSheet(name.to_string())),
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ReadError::NoSheet("<first>".to_string()))?,
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    debug!(sheet = %sheet_name, "read worksheet");
    Ok(table_from_range(&range))
}

/// The first row of the used range holds the headers
fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row.iter().map(|cell| cell.to_string()).collect(),
        None => return Table::default(),
    };
    let rows = rows
        .map(|row| row.iter().map(parse_cell_value).collect())
        .collect();
    Table::new(headers, rows)
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::Error(e) => CellValue::Text(format!("{:?}", e)),
        Data::Empty => CellValue::Missing,
        Data::DateTime(dt) => CellValue::Text(format_date_time(dt)),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Show a date/time cell the way a spreadsheet would rather than as its serial number.
///
/// Serials below one day are times of day, whole serials are dates.
fn format_date_time(dt: &ExcelDateTime) -> String {
    let serial = dt.as_f64();
    if dt.is_duration() {
        return match dt.as_duration() {
            Some(duration) => {
                let minutes = duration.num_minutes();
                format!("{}:{:02}", minutes / 60, (minutes % 60).abs())
            }
            None => serial.to_string(),
        };
    }

    let Some(datetime) = dt.as_datetime() else {
        return serial.to_string();
    };
    let pattern = if serial < 1.0 {
        "%H:%M"
    } else if serial.fract() == 0.0 {
        "%Y-%m-%d"
    } else {
        "%Y-%m-%d %H:%M"
    };
    datetime.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::ExcelDateTimeType;

    #[test]
    fn test_table_from_range() {
        let mut range = Range::new((0, 0), (2, 2));
        range.set_value((0, 0), Data::String("Name".to_string()));
        range.set_value((0, 1), Data::String(" payment ".to_string()));
        range.set_value((0, 2), Data::String("Qty".to_string()));
        range.set_value((1, 0), Data::String("Aisha".to_string()));
        range.set_value((1, 1), Data::String("done".to_string()));
        range.set_value((1, 2), Data::Int(3));
        range.set_value((2, 1), Data::Bool(true));

        let table = table_from_range(&range);

        assert_eq!(table.headers, vec!["Name", "payment", "Qty"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0][2], CellValue::Number(3.0));
        assert_eq!(table.rows[1][0], CellValue::Missing);
        assert_eq!(table.rows[1][1], CellValue::Text("true".to_string()));
        assert_eq!(table.rows[1][2], CellValue::Missing);
    }

    #[test]
    fn test_date_cells_are_readable() {
        let date_time = |serial| Data::DateTime(ExcelDateTime::new(serial, ExcelDateTimeType::DateTime, false));

        let mut range = Range::new((0, 0), (1, 3));
        range.set_value((0, 0), Data::String("Name".to_string()));
        range.set_value((0, 1), Data::String("Collect at".to_string()));
        range.set_value((0, 2), Data::String("Collect on".to_string()));
        range.set_value((0, 3), Data::String("Ordered".to_string()));
        range.set_value((1, 0), Data::String("Aisha".to_string()));
        range.set_value((1, 1), date_time(0.6875));
        range.set_value((1, 2), date_time(45541.0));
        range.set_value((1, 3), date_time(45541.6875));

        let table = table_from_range(&range);

        assert_eq!(table.rows[0][1], CellValue::Text("16:30".to_string()));
        assert_eq!(table.rows[0][2], CellValue::Text("2024-09-06".to_string()));
        assert_eq!(table.rows[0][3], CellValue::Text("2024-09-06 16:30".to_string()));
    }

    #[test]
    fn test_durations_are_hours_and_minutes() {
        let elapsed = ExcelDateTime::new(1.5, ExcelDateTimeType::TimeDelta, false);
        assert_eq!(format_date_time(&elapsed), "36:00");
    }

    #[test]
    fn test_empty_range() {
        let range: Range<Data> = Range::empty();
        assert!(table_from_range(&range).is_empty());
    }
}
