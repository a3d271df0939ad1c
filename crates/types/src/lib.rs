pub mod color;
pub mod format;
pub mod geometry;
pub mod labels;
pub mod result;
pub mod table;

pub use color::Color;
pub use format::{ReportFormat, UnknownFormat};
pub use geometry::{Rect, Size};
pub use labels::Labels;
pub use result::{QueryErrorEntry, QueryResult};
pub use table::{Record, Table};

/// The schema-less tree a query layer hands to the engine.
pub type ResultTree = serde_json::Value;
