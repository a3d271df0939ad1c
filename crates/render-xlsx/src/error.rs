use tally_render_core::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkbookError {
    #[error("XLSX write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Table '{0}' has more rows than a worksheet can hold")]
    TooManyRows(String),

    #[error("Table '{0}' has more columns than a worksheet can hold")]
    TooManyColumns(String),
}

impl From<WorkbookError> for RenderError {
    fn from(err: WorkbookError) -> Self {
        RenderError::Workbook(err.to_string())
    }
}
