//! Display cards, the rendered unit for one row

use serde::Serialize;

/// Shown in place of the field table when a row has nothing left to display
pub const EMPTY_CARD_NOTICE: &str = "No data to display for this row after filtering.";

/// One label/value pair shown on a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedField {
    pub label: String,
    pub value: String,
}

impl ProjectedField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Everything shown for one surviving row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayCard {
    /// 1-based display row number
    pub row: usize,
    pub name: String,
    pub fields: Vec<ProjectedField>,
    pub needs_collection_reminder: bool,
    pub needs_payment_reminder: bool,
    /// Follow-up message; absent when the card has no fields
    pub message: Option<String>,
}

impl DisplayCard {
    pub fn heading(&self) -> String {
        format!("--- Row {}: {} ---", self.row, self.name)
    }

    /// Whether the card renders as the empty-result notice
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
