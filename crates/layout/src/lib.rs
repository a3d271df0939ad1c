//! Paginated layout of tables.
//!
//! Layout is split in two layers so it can be tested without a PDF backend:
//!
//! - [`TableLayout`] is a pure state machine for one table. Each call to
//!   [`TableLayout::transition`] consumes one event (a row, or the end of the table)
//!   and returns the next state plus the drawing instructions for that step.
//! - [`DocumentPaginator`] drives one state machine per table, serializing cells as it
//!   goes, splits the instruction stream into pages and stamps the footers.

mod config;
mod instruction;
mod paginator;
mod table_layout;

pub use config::{DocumentTheme, PageGeometry};
pub use instruction::{FontFace, Instruction, TextRun};
pub use paginator::{DocumentPaginator, PageLayout, PaginatedDocument};
pub use table_layout::{TableEvent, TableLayout, TableState};

pub use tally_types::geometry::{Rect, Size};
