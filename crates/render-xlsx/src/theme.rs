use serde::{Deserialize, Serialize};
use tally_types::Color;

/// Colors and metadata for generated workbooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkbookTheme {
    pub title_text: Color,
    pub title_fill: Color,
    pub header_text: Color,
    pub header_fill: Color,
    pub header_border: Color,
    pub stripe: Color,
    pub body_border: Color,
    /// Footer and "no data" text.
    pub muted_text: Color,
    /// Written to the workbook's document properties.
    pub author: String,
}

impl Default for WorkbookTheme {
    fn default() -> Self {
        Self {
            title_text: Color::rgb(0x1F, 0x47, 0x88),
            title_fill: Color::rgb(0xE7, 0xE9, 0xF5),
            header_text: Color::WHITE,
            header_fill: Color::rgb(0x44, 0x72, 0xC4),
            header_border: Color::BLACK,
            stripe: Color::rgb(0xF8, 0xF9, 0xFA),
            body_border: Color::gray(0xCC),
            muted_text: Color::gray(0x66),
            author: "Tally Reports".into(),
        }
    }
}
