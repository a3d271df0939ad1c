//! Workbook backend: one styled worksheet per table, written with `rust_xlsxwriter`.

mod error;
mod renderer;
mod sheet_name;
mod theme;

pub use error::WorkbookError;
pub use renderer::WorkbookRenderer;
pub use sheet_name::{SheetNames, MAX_SHEET_NAME_CHARS};
pub use theme::WorkbookTheme;
