use crate::context::RenderContext;
use crate::error::RenderError;
use tally_types::{ReportFormat, Table};

/// A backend that turns extracted tables into one output byte buffer.
///
/// Implementations must keep all layout state local to a `render` call so a
/// single renderer can serve concurrent requests.
pub trait ReportRenderer: Send + Sync {
    fn format(&self) -> ReportFormat;

    /// Renders `tables` in order. Cells are serialized with `ctx.serializer` while laying out.
    fn render(&self, tables: &[Table], ctx: &RenderContext) -> Result<Vec<u8>, RenderError>;
}
