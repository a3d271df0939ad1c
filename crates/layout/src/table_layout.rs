use crate::config::{DocumentTheme, PageGeometry};
use crate::instruction::{FontFace, Instruction, TextRun};
use tally_tabular::text::{capitalize, clip};
use tally_types::{Labels, Rect};

const TITLE_BAND_HEIGHT: f32 = 30.0;
const TITLE_SIZE: f32 = 16.0;
const TITLE_ADVANCE: f32 = 40.0;
const CONTINUED_BAND_HEIGHT: f32 = 25.0;
const CONTINUED_SIZE: f32 = 12.0;
const CONTINUED_ADVANCE: f32 = 35.0;
const HEADER_GAP: f32 = 10.0;
const HEADER_SIZE: f32 = 10.0;
const HEADER_ADVANCE_PAD: f32 = 3.0;
const BODY_SIZE: f32 = 9.0;
const NOTICE_SIZE: f32 = 12.0;
const CELL_INSET: f32 = 5.0;
const TITLE_INSET: f32 = 10.0;

/// Where one table's layout currently stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableState {
    /// Nothing has been drawn for the table yet.
    Pending,
    /// A page is open; the next row's top edge sits at `cursor_y`.
    Open { cursor_y: f32, rows_emitted: usize },
    /// The table is complete. Further events are ignored.
    Closed,
}

#[derive(Debug, Clone, Copy)]
pub enum TableEvent<'r> {
    /// One data row, already serialized, in header order.
    Row(&'r [String]),
    /// No more rows follow.
    Finish,
}

/// Layout rules for one table: title, column metrics and header labels.
#[derive(Debug, Clone)]
pub struct TableLayout<'a> {
    geometry: &'a PageGeometry,
    theme: &'a DocumentTheme,
    labels: &'a Labels,
    title: String,
    header_labels: Vec<String>,
    column_width: f32,
}

impl<'a> TableLayout<'a> {
    pub fn new(
        name: &str,
        headers: &[String],
        geometry: &'a PageGeometry,
        theme: &'a DocumentTheme,
        labels: &'a Labels,
    ) -> Self {
        let header_labels = headers
            .iter()
            .map(|h| clip(&capitalize(h), geometry.header_clip).to_string())
            .collect();
        Self {
            geometry,
            theme,
            labels,
            title: name.to_uppercase(),
            header_labels,
            column_width: geometry.column_width(headers.len()),
        }
    }

    fn band_width(&self) -> f32 {
        self.header_labels.len() as f32 * self.column_width
    }

    /// Advances the state machine by one event.
    ///
    /// Pure: the same `(state, event)` pair always yields the same result.
    pub fn transition(&self, state: TableState, event: TableEvent<'_>) -> (TableState, Vec<Instruction>) {
        let mut out = Vec::new();
        let next = match (state, event) {
            (TableState::Pending, TableEvent::Finish) => {
                let cursor = self.open_page(false, &mut out);
                out.push(self.text(
                    self.geometry.margin,
                    cursor,
                    self.labels.no_data.clone(),
                    FontFace::Italic,
                    NOTICE_SIZE,
                    self.theme.notice_text,
                ));
                TableState::Closed
            }
            (TableState::Pending, TableEvent::Row(cells)) => {
                let cursor = self.open_page(false, &mut out) - HEADER_GAP;
                let cursor = self.header_band(cursor, &mut out);
                self.emit_row(cursor, 0, cells, &mut out)
            }
            (TableState::Open { cursor_y, rows_emitted }, TableEvent::Row(cells)) => {
                let cursor = if cursor_y < self.geometry.break_threshold {
                    log::debug!(
                        "Table '{}' crossed the page threshold after {} rows; continuing on a new page",
                        self.title,
                        rows_emitted
                    );
                    let cursor = self.open_page(true, &mut out);
                    self.header_band(cursor, &mut out)
                } else {
                    cursor_y
                };
                self.emit_row(cursor, rows_emitted, cells, &mut out)
            }
            (TableState::Open { .. }, TableEvent::Finish) | (TableState::Closed, _) => TableState::Closed,
        };
        (next, out)
    }

    /// Starts a page with its title band and returns the cursor below the band.
    fn open_page(&self, continuation: bool, out: &mut Vec<Instruction>) -> f32 {
        let g = self.geometry;
        let top = g.top();
        out.push(Instruction::NewPage { continuation });

        let (band_height, size, advance, title) = if continuation {
            (
                CONTINUED_BAND_HEIGHT,
                CONTINUED_SIZE,
                CONTINUED_ADVANCE,
                self.labels.continued_title(&self.title),
            )
        } else {
            (TITLE_BAND_HEIGHT, TITLE_SIZE, TITLE_ADVANCE, self.title.clone())
        };

        out.push(Instruction::FillRect {
            rect: Rect::new(g.margin, top + 5.0 - band_height, g.content_width(), band_height),
            color: self.theme.title_band,
        });
        out.push(self.text(g.margin + TITLE_INSET, top - 5.0, title, FontFace::Bold, size, self.theme.title_text));
        top - advance
    }

    fn header_band(&self, cursor: f32, out: &mut Vec<Instruction>) -> f32 {
        let g = self.geometry;
        out.push(Instruction::FillRect {
            rect: Rect::new(g.margin, cursor - (g.header_row_height - 4.0), self.band_width(), g.header_row_height),
            color: self.theme.header_band,
        });
        for (i, label) in self.header_labels.iter().enumerate() {
            out.push(self.text(
                self.column_x(i),
                cursor - 3.0,
                label.clone(),
                FontFace::Bold,
                HEADER_SIZE,
                self.theme.header_text,
            ));
        }
        cursor - (g.header_row_height + HEADER_ADVANCE_PAD)
    }

    fn emit_row(&self, cursor: f32, index: usize, cells: &[String], out: &mut Vec<Instruction>) -> TableState {
        let g = self.geometry;
        if index % 2 == 0 {
            out.push(Instruction::FillRect {
                rect: Rect::new(g.margin, cursor - (g.body_row_height - 2.0), self.band_width(), g.body_row_height),
                color: self.theme.stripe,
            });
        }
        for (i, cell) in cells.iter().enumerate().take(self.header_labels.len()) {
            let content = if cell.is_empty() { "-" } else { clip(cell, g.cell_clip) };
            out.push(self.text(
                self.column_x(i),
                cursor - 2.0,
                content.to_string(),
                FontFace::Regular,
                BODY_SIZE,
                self.theme.body_text,
            ));
        }
        TableState::Open {
            cursor_y: cursor - g.body_row_height,
            rows_emitted: index + 1,
        }
    }

    fn column_x(&self, column: usize) -> f32 {
        self.geometry.margin + CELL_INSET + column as f32 * self.column_width
    }

    fn text(
        &self,
        x: f32,
        y: f32,
        content: String,
        face: FontFace,
        size: f32,
        color: tally_types::Color,
    ) -> Instruction {
        Instruction::Text(TextRun { x, y, content, face, size, color })
    }
}
