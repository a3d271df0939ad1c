use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use tally_layout::{FontFace, Instruction, PageLayout, TextRun};
use tally_types::{Color, Rect};

/// Resource name of each font face in the page `Font` dictionary.
pub(crate) fn font_resource(face: FontFace) -> &'static str {
    match face {
        FontFace::Regular => "F1",
        FontFace::Bold => "F2",
        FontFace::Italic => "F3",
    }
}

/// The standard Type 1 font backing each face. None of them needs embedding.
pub(crate) fn base_font(face: FontFace) -> &'static str {
    match face {
        FontFace::Regular => "Helvetica",
        FontFace::Bold => "Helvetica-Bold",
        FontFace::Italic => "Helvetica-Oblique",
    }
}

/// Converts one laid-out page into a content stream.
pub fn page_content(page: &PageLayout) -> Content {
    let mut ctx = PageContext::new();
    for instruction in &page.instructions {
        ctx.draw(instruction);
    }
    ctx.finish()
}

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<(FontFace, f32)>,
    fill_color: Option<Color>,
}

/// Emits operators while skipping redundant font and color changes.
struct PageContext {
    content: Content,
    state: PageRenderState,
}

impl PageContext {
    fn new() -> Self {
        Self { content: Content { operations: vec![] }, state: Default::default() }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn draw(&mut self, instruction: &Instruction) {
        match instruction {
            Instruction::FillRect { rect, color } => self.fill_rect(rect, *color),
            Instruction::Text(run) => self.draw_text(run),
            Instruction::NewPage { .. } => {
                log::warn!("Ignoring page break inside a single page's instruction list");
            }
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.to_unit();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    fn set_font(&mut self, face: FontFace, size: f32) {
        if self.state.font != Some((face, size)) {
            self.push("Tf", vec![Object::Name(font_resource(face).as_bytes().to_vec()), size.into()]);
            self.state.font = Some((face, size));
        }
    }

    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        self.set_fill_color(color);
        self.push("re", vec![rect.x.into(), rect.y.into(), rect.width.into(), rect.height.into()]);
        self.push("f", vec![]);
    }

    fn draw_text(&mut self, run: &TextRun) {
        if run.content.trim().is_empty() {
            return;
        }
        self.push("BT", vec![]);
        self.set_font(run.face, run.size);
        self.set_fill_color(run.color);
        self.push("Td", vec![run.x.into(), run.y.into()]);
        self.push("Tj", vec![Object::String(to_win_ansi(&run.content), StringFormat::Literal)]);
        self.push("ET", vec![]);
    }
}

/// Encodes text for the standard fonts' WinAnsiEncoding. Unmappable characters become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}
