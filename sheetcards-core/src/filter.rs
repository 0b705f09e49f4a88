//! Row filtering by payment and contact status

use crate::headers::{KnownHeaders, column_index};
use crate::reader::CellValue;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// The two user toggles that decide which rows are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterToggles {
    /// When false, rows with any cell reading "done" are hidden
    pub show_done_payments: bool,
    /// When true, only rows with a blank "Contact by" cell are shown
    pub show_only_blank_contact: bool,
}

impl Default for FilterToggles {
    fn default() -> Self {
        Self {
            show_done_payments: true,
            show_only_blank_contact: false,
        }
    }
}

/// Keep/skip decision for the rows of one table
#[derive(Debug, Clone)]
pub struct RowFilter {
    toggles: FilterToggles,
    contact_by: Option<usize>,
}

impl RowFilter {
    pub fn new(headers: &[String], columns: &KnownHeaders, toggles: FilterToggles) -> Self {
        Self {
            toggles,
            contact_by: column_index(headers, &columns.contact_by),
        }
    }

    /// Whether the row survives both the done check and the contact-by check
    pub fn keep(&self, row: &[CellValue]) -> bool {
        if !self.toggles.show_done_payments && has_done_cell(row) {
            trace!("row skipped: a cell reads 'done'");
            return false;
        }

        if self.toggles.show_only_blank_contact {
            if let Some(index) = self.contact_by {
                if !row.get(index).is_none_or(CellValue::is_blank) {
                    trace!("row skipped: contact by is filled in");
                    return false;
                }
            }
        }

        true
    }
}

/// Whether any cell of the row, trimmed and lower-cased, is exactly `done`.
///
/// This scans the whole row, not only the payment column, so a name or note
/// that reads "Done" hides the row too.
pub fn has_done_cell(row: &[CellValue]) -> bool {
    row.iter()
        .any(|cell| cell.to_string().trim().to_lowercase() == "done")
}
