//! PDF backend for paginated reports, built on the lopdf library.
//!
//! Layout is delegated to `tally-layout`; this crate only turns the resulting
//! drawing instructions into PDF content streams and assembles the document.

mod content;
mod renderer;

pub use content::{page_content, to_win_ansi};
pub use renderer::LopdfRenderer;
