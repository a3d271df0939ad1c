use crate::config::{DocumentTheme, PageGeometry};
use crate::instruction::{FontFace, Instruction, TextRun};
use crate::table_layout::{TableEvent, TableLayout, TableState};
use tally_tabular::ValueSerializer;
use tally_types::{Labels, Table};

const FOOTER_SIZE: f32 = 8.0;
const FOOTER_CENTER_OFFSET: f32 = 20.0;
const FOOTER_RIGHT_WIDTH: f32 = 80.0;

/// The drawing instructions of one physical page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// Index of the table this page belongs to.
    pub table_index: usize,
    pub continuation: bool,
    pub instructions: Vec<Instruction>,
}

impl PageLayout {
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.instructions.iter().filter_map(Instruction::as_text)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginatedDocument {
    pub pages: Vec<PageLayout>,
}

impl PaginatedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Lays a sequence of tables out across fixed-size pages.
///
/// Holds only borrowed configuration; every call to [`paginate`](Self::paginate)
/// builds its own cursors, so one paginator can serve many documents.
pub struct DocumentPaginator<'a> {
    geometry: &'a PageGeometry,
    theme: &'a DocumentTheme,
    labels: &'a Labels,
    serializer: &'a ValueSerializer,
}

impl<'a> DocumentPaginator<'a> {
    pub fn new(
        geometry: &'a PageGeometry,
        theme: &'a DocumentTheme,
        labels: &'a Labels,
        serializer: &'a ValueSerializer,
    ) -> Self {
        Self { geometry, theme, labels, serializer }
    }

    /// Lays out every table in order, then stamps the footer on each page.
    ///
    /// `footer_date` is printed verbatim in the right footer slot.
    pub fn paginate(&self, tables: &[Table], footer_date: &str) -> PaginatedDocument {
        let mut pages: Vec<PageLayout> = Vec::new();

        for (table_index, table) in tables.iter().enumerate() {
            let headers = table.headers();
            let layout = TableLayout::new(&table.name, &headers, self.geometry, self.theme, self.labels);
            let mut state = TableState::Pending;

            for record in &table.rows {
                let cells = self.serializer.serialize_row(record, &headers);
                let (next, ops) = layout.transition(state, TableEvent::Row(&cells));
                push_instructions(&mut pages, table_index, ops);
                state = next;
            }
            let (_, ops) = layout.transition(state, TableEvent::Finish);
            push_instructions(&mut pages, table_index, ops);

            log::debug!(
                "Laid out table '{}' ({} rows, {} columns); document now has {} page(s)",
                table.name,
                table.row_count(),
                headers.len(),
                pages.len()
            );
        }

        for (index, page) in pages.iter_mut().enumerate() {
            let total = tables[page.table_index].row_count();
            self.stamp_footer(page, index + 1, total, footer_date);
        }

        PaginatedDocument { pages }
    }

    fn stamp_footer(&self, page: &mut PageLayout, page_number: usize, total_rows: usize, footer_date: &str) {
        let g = self.geometry;
        let slots = [
            (g.margin, self.labels.page_total(total_rows)),
            (g.page_size.width / 2.0 - FOOTER_CENTER_OFFSET, self.labels.page_number(page_number)),
            (g.page_size.width - g.margin - FOOTER_RIGHT_WIDTH, footer_date.to_string()),
        ];
        for (x, content) in slots {
            page.instructions.push(Instruction::Text(TextRun {
                x,
                y: g.footer_y,
                content,
                face: FontFace::Regular,
                size: FOOTER_SIZE,
                color: self.theme.footer_text,
            }));
        }
    }
}

/// Appends instructions to the current page, opening a new page at each `NewPage`.
fn push_instructions(pages: &mut Vec<PageLayout>, table_index: usize, ops: Vec<Instruction>) {
    for op in ops {
        if let Instruction::NewPage { continuation } = op {
            pages.push(PageLayout { table_index, continuation, instructions: Vec::new() });
            continue;
        }
        match pages.last_mut() {
            Some(page) => page.instructions.push(op),
            None => log::warn!("Dropping drawing instruction emitted before any page was opened"),
        }
    }
}
