//! Row range selection
//!
//! Rows are numbered from 1 for the first data row; the header row has no
//! number. Ordinal `i` (0-based, as stored in the table) is displayed as row
//! `i + 1` everywhere: range bounds, card headings and placeholder names.

use crate::error::RangeError;
use serde::Serialize;
use std::ops::Range;

/// Display row number for a 0-based row ordinal
pub fn display_number(ordinal: usize) -> usize {
    ordinal + 1
}

/// An inclusive, validated range of display row numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowRange {
    start: usize,
    end: usize,
}

impl RowRange {
    /// Validate `start..=end` against a table with `row_count` data rows.
    ///
    /// An inverted range is rejected before the bounds are looked at.
    pub fn new(start: usize, end: usize, row_count: usize) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        if start < 1 {
            return Err(RangeError::OutOfBounds {
                row: start,
                max: row_count,
            });
        }
        if end > row_count {
            return Err(RangeError::OutOfBounds {
                row: end,
                max: row_count,
            });
        }
        Ok(Self { start, end })
    }

    /// First `span` rows of the table, or `None` when there are no rows
    pub fn leading(row_count: usize, span: usize) -> Option<Self> {
        if row_count == 0 {
            return None;
        }
        Some(Self {
            start: 1,
            end: row_count.min(span.max(1)),
        })
    }

    /// Resolve optional user bounds, falling back to the leading range for whichever is unset
    pub fn resolve(
        start: Option<usize>,
        end: Option<usize>,
        row_count: usize,
        span: usize,
    ) -> Result<Self, RangeError> {
        let fallback = Self::leading(row_count, span).unwrap_or(Self { start: 1, end: 0 });
        Self::new(
            start.unwrap_or(fallback.start),
            end.unwrap_or(fallback.end),
            row_count,
        )
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// 0-based ordinals covered by this range
    pub fn ordinals(&self) -> Range<usize> {
        (self.start - 1)..self.end
    }

    /// Number of rows covered; never zero
    pub fn row_span(&self) -> usize {
        self.end - self.start + 1
    }
}
