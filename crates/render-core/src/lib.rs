//! Core rendering abstractions for report generation.
//!
//! This crate provides the fundamental traits and types used by the report backends:
//! - `ReportRenderer` trait implemented by the document and workbook backends
//! - `RenderContext`, the per-request inputs every backend reads
//! - Error types for rendering operations

mod context;
mod error;
mod traits;

pub use context::RenderContext;
pub use error::RenderError;
pub use traits::ReportRenderer;
