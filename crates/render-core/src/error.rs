use thiserror::Error;

/// Failures raised while turning tables into report bytes.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write report bytes: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not assemble the PDF document: {0}")]
    Pdf(String),
    #[error("Could not assemble the workbook: {0}")]
    Workbook(String),
    #[error("Rendering failed: {0}")]
    Other(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        Self::Pdf(err.to_string())
    }
}
