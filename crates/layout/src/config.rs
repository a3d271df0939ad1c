use serde::{Deserialize, Serialize};
use tally_types::{Color, Size};

/// Page dimensions and band metrics, in PDF units (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageGeometry {
    pub page_size: Size,
    pub margin: f32,
    /// Once the row cursor drops below this height a new page is started.
    pub break_threshold: f32,
    pub max_column_width: f32,
    pub header_row_height: f32,
    pub body_row_height: f32,
    /// Baseline of the footer line.
    pub footer_y: f32,
    /// Characters kept from a header label.
    pub header_clip: usize,
    /// Characters kept from a body cell.
    pub cell_clip: usize,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_size: Size::a4(),
            margin: 50.0,
            break_threshold: 80.0,
            max_column_width: 120.0,
            header_row_height: 22.0,
            body_row_height: 16.0,
            footer_y: 30.0,
            header_clip: 12,
            cell_clip: 28,
        }
    }
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.page_size.width - 2.0 * self.margin
    }

    /// `min(content_width / columns, max_column_width)`.
    pub fn column_width(&self, columns: usize) -> f32 {
        if columns == 0 {
            return self.max_column_width;
        }
        (self.content_width() / columns as f32).min(self.max_column_width)
    }

    pub fn top(&self) -> f32 {
        self.page_size.height - self.margin
    }
}

/// Colors of the document bands. The header band inverts the body scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentTheme {
    pub title_band: Color,
    pub title_text: Color,
    pub header_band: Color,
    pub header_text: Color,
    pub stripe: Color,
    pub body_text: Color,
    pub notice_text: Color,
    pub footer_text: Color,
}

impl Default for DocumentTheme {
    fn default() -> Self {
        Self {
            title_band: Color::rgb(0xE6, 0xEB, 0xF2),
            title_text: Color::rgb(0x1A, 0x33, 0x80),
            header_band: Color::rgb(0x4D, 0x66, 0xB3),
            header_text: Color::WHITE,
            stripe: Color::gray(0xF7),
            body_text: Color::gray(0x33),
            notice_text: Color::BLACK,
            footer_text: Color::gray(0x80),
        }
    }
}
