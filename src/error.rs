// src/error.rs
use crate::config::ConfigError;
use tally_render_core::RenderError;
use thiserror::Error;

/// How a transport collaborator should classify a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself was at fault (an HTTP 400 for a web host).
    Client,
    /// The query ran but returned nothing to report on (HTTP 404).
    NotFound,
    Internal,
}

/// Every way resolving a report can fail.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Query returned errors: {}", .0.join("; "))]
    Query(Vec<String>),

    #[error("Query returned no data")]
    EmptyResult,

    #[error("Unsupported report format '{0}' (expected pdf or excel)")]
    UnsupportedFormat(String),

    #[error("Unsupported resource '{0}'")]
    UnsupportedResource(String),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ReportError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ReportError::Query(_) | ReportError::UnsupportedFormat(_) | ReportError::UnsupportedResource(_) => {
                ErrorClass::Client
            }
            ReportError::EmptyResult => ErrorClass::NotFound,
            ReportError::Render(_) | ReportError::Config(_) => ErrorClass::Internal,
        }
    }
}

impl From<tally_types::UnknownFormat> for ReportError {
    fn from(e: tally_types::UnknownFormat) -> Self {
        ReportError::UnsupportedFormat(e.0)
    }
}
