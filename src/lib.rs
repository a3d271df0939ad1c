//! Tally turns schema-less query results into tabular reports.
//!
//! A [`ReportService`] validates a [`QueryResult`], infers one table per
//! top-level field and renders the tables either as a paginated PDF or as a
//! multi-sheet XLSX workbook.
//!
//! ```ignore
//! use tally::{QueryResult, ReportFormat, ReportService};
//!
//! let service = ReportService::builder().build()?;
//! let result: QueryResult = serde_json::from_str(r#"{"data": {"dishes": [{"id": 1}]}}"#)?;
//! let report = service.resolve(&result, ReportFormat::Document)?;
//! std::fs::write(&report.filename, &report.bytes)?;
//! ```

pub mod config;
pub mod error;
pub mod notify;
pub mod service;

pub use config::{ConfigError, ExecutorKind, Filenames, ReportConfig};
pub use error::{ErrorClass, ReportError};
pub use notify::{NotifyError, ReportEvent, ReportEventData, ReportNotifier};
pub use service::{RenderedReport, ReportRequest, ReportService, ReportServiceBuilder, ReportSummary};

// Re-export the building blocks so hosts only need one dependency.
pub use tally_executor::{Executor, ExecutorImpl, SyncExecutor};
pub use tally_layout::{DocumentPaginator, DocumentTheme, PageGeometry, PaginatedDocument};
pub use tally_render_core::{RenderContext, RenderError, ReportRenderer};
pub use tally_render_lopdf::LopdfRenderer;
pub use tally_render_xlsx::{WorkbookRenderer, WorkbookTheme};
pub use tally_tabular::{extract_tables, SerializerConfig, ValueSerializer};
pub use tally_types::{Labels, QueryResult, Record, ReportFormat, ResultTree, Table};

#[cfg(feature = "rayon-executor")]
pub use tally_executor::RayonExecutor;
