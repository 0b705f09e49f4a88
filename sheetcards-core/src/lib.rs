//! sheetcards-core: render order sheet rows as per-row cards
//!
//! One render pass loads a table, selects a row range, filters rows by
//! payment and contact status, projects the non-blank cells of each surviving
//! row and attaches a follow-up message.

pub mod card;
pub mod config;
pub mod error;
pub mod filter;
pub mod headers;
pub mod message;
pub mod notice;
pub mod projector;
pub mod range;
pub mod reader;
pub mod session;

use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

pub use card::{DisplayCard, ProjectedField};
pub use config::SheetCardsConfig;
pub use error::{CardError, EmptyTableError, RangeError, ReadError};
pub use filter::{FilterToggles, RowFilter};
pub use headers::{HeaderWarning, KnownHeaders};
pub use message::MessageSynthesizer;
pub use notice::{Notice, NoticeLevel};
pub use range::RowRange;
pub use reader::{CellValue, Table};
pub use session::Session;

/// A table that loaded with at least one data row
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: Table,
    /// Known headers that only matched loosely
    pub warnings: Vec<HeaderWarning>,
}

/// Output of one render pass: banners followed by cards in row order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub notices: Vec<Notice>,
    pub cards: Vec<DisplayCard>,
}

impl Frame {
    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(|n| n.level == NoticeLevel::Error)
    }
}

/// Main rendering interface
pub struct CardRenderer {
    config: SheetCardsConfig,
}

impl CardRenderer {
    /// Create a new renderer with default configuration
    pub fn new() -> Self {
        Self::with_config(SheetCardsConfig::default())
    }

    /// Create a new renderer with custom configuration
    pub fn with_config(config: SheetCardsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SheetCardsConfig {
        &self.config
    }

    /// Load a table and check its known headers
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<LoadedTable, CardError> {
        let table = reader::read_table(path, &self.config.loader)?;
        if table.is_empty() {
            return Err(EmptyTableError.into());
        }

        let warnings = self.config.columns.validate(&table.headers);
        for warning in &warnings {
            warn!("{}", warning);
        }

        Ok(LoadedTable { table, warnings })
    }

    /// Validate optional user bounds against a table
    pub fn resolve_range(
        &self,
        table: &Table,
        start: Option<usize>,
        end: Option<usize>,
    ) -> Result<RowRange, CardError> {
        if table.is_empty() {
            return Err(EmptyTableError.into());
        }
        Ok(RowRange::resolve(
            start,
            end,
            table.row_count(),
            self.config.range.default_span,
        )?)
    }

    /// Build the cards for the surviving rows of `range`, in row order
    pub fn render(&self, table: &Table, range: RowRange, toggles: FilterToggles) -> Vec<DisplayCard> {
        let columns = &self.config.columns;
        let filter = RowFilter::new(&table.headers, columns, toggles);
        let synthesizer = MessageSynthesizer::new(
            &table.headers,
            columns,
            self.config.message.remind_when_column_absent,
        );

        let mut cards = Vec::with_capacity(range.row_span());
        for ordinal in range.ordinals() {
            let Some(row) = table.row(ordinal) else {
                break;
            };
            if !filter.keep(row) {
                continue;
            }

            let projection = projector::project_row(row, &table.headers, ordinal, columns);
            let fragments = synthesizer.fragments(row);
            // An empty card carries no message, so it asks for nothing either
            let has_fields = !projection.fields.is_empty();
            let message = has_fields.then(|| fragments.compose());

            cards.push(DisplayCard {
                row: range::display_number(ordinal),
                name: projection.name,
                fields: projection.fields,
                needs_collection_reminder: has_fields && !fragments.collection.is_empty(),
                needs_payment_reminder: has_fields && !fragments.payment.is_empty(),
                message,
            });
        }

        debug!(
            start = range.start(),
            end = range.end(),
            rows = range.row_span(),
            cards = cards.len(),
            "rendered range"
        );
        cards
    }

    /// One full pass over an already loaded table, with errors turned into banners
    pub fn frame(
        &self,
        loaded: &LoadedTable,
        start: Option<usize>,
        end: Option<usize>,
        toggles: FilterToggles,
    ) -> Frame {
        let mut notices = vec![Notice::success("File read successfully!")];
        notices.extend(
            loaded
                .warnings
                .iter()
                .map(|warning| Notice::warning(warning.to_string())),
        );

        match self.resolve_range(&loaded.table, start, end) {
            Ok(range) => {
                notices.push(Notice::info(format!(
                    "Displaying rows from {} to {}.",
                    range.start(),
                    range.end()
                )));
                let cards = self.render(&loaded.table, range, toggles);
                Frame { notices, cards }
            }
            Err(err) => {
                notices.push(Notice::from(&err));
                Frame {
                    notices,
                    cards: Vec::new(),
                }
            }
        }
    }

    /// Load and render in one go, as a single invocation does
    pub fn frame_file<P: AsRef<Path>>(
        &self,
        path: P,
        start: Option<usize>,
        end: Option<usize>,
        toggles: FilterToggles,
    ) -> Frame {
        match self.load(path) {
            Ok(loaded) => self.frame(&loaded, start, end, toggles),
            Err(err) => Frame {
                notices: vec![Notice::from(&err)],
                cards: Vec::new(),
            },
        }
    }
}

impl Default for CardRenderer {
    fn default() -> Self {
        Self::new()
    }
}
