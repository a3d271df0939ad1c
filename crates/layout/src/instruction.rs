use tally_types::{Color, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

/// A single line of text, positioned by its baseline origin.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub content: String,
    pub face: FontFace,
    pub size: f32,
    pub color: Color,
}

/// A backend-neutral drawing step. Coordinates have their origin at the page's
/// lower-left corner, as in PDF.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Starts a new physical page; everything until the next `NewPage` belongs to it.
    NewPage { continuation: bool },
    FillRect { rect: Rect, color: Color },
    Text(TextRun),
}

impl Instruction {
    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Instruction::Text(run) => Some(run),
            _ => None,
        }
    }
}
