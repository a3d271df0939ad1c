use lopdf::content::{Content, Operation};
use lopdf::{Document as LopdfDocument, Object};

/// Decodes a WinAnsi string operand back to text.
fn decode_win_ansi(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80 => '€',
            0x85 => '…',
            0x91 => '‘',
            0x92 => '’',
            0x93 => '“',
            0x94 => '”',
            0x95 => '•',
            0x96 => '–',
            0x97 => '—',
            b => b as char,
        })
        .collect()
}

fn page_operations(doc: &LopdfDocument, page: u32) -> Vec<Operation> {
    let pages = doc.get_pages();
    let Some(page_id) = pages.get(&page) else {
        return Vec::new();
    };
    let Ok(data) = doc.get_page_content(*page_id) else {
        return Vec::new();
    };
    Content::decode(&data).map(|content| content.operations).unwrap_or_default()
}

/// Text shown on one page (1-based), one entry per `Tj` operator.
pub fn page_texts(doc: &LopdfDocument, page: u32) -> Vec<String> {
    page_operations(doc, page)
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(decode_win_ansi(bytes)),
            _ => None,
        })
        .collect()
}

/// Font resource names selected by `Tf` on one page, in order.
pub fn page_font_resources(doc: &LopdfDocument, page: u32) -> Vec<String> {
    page_operations(doc, page)
        .iter()
        .filter(|op| op.operator == "Tf")
        .filter_map(|op| match op.operands.first() {
            Some(Object::Name(name)) => Some(String::from_utf8_lossy(name).into_owned()),
            _ => None,
        })
        .collect()
}

/// Extract all text content from a PDF document, one line per text run
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    for page in 1..=doc.get_pages().len() as u32 {
        for run in page_texts(doc, page) {
            text.push_str(&run);
            text.push('\n');
        }
    }
    text
}

/// Base fonts declared anywhere in the document, including inline font dictionaries.
pub fn font_names(doc: &LopdfDocument) -> Vec<String> {
    fn collect(object: &Object, fonts: &mut Vec<String>) {
        let Ok(dict) = object.as_dict() else { return };
        let is_font = dict.get(b"Type").and_then(|t| t.as_name()).is_ok_and(|t| t == b"Font");
        if let (true, Ok(base)) = (is_font, dict.get(b"BaseFont").and_then(|b| b.as_name())) {
            fonts.push(String::from_utf8_lossy(base).into_owned());
        }
        for (_, value) in dict.iter() {
            collect(value, fonts);
        }
    }

    let mut fonts = Vec::new();
    for object in doc.objects.values() {
        collect(object, &mut fonts);
    }
    fonts.sort();
    fonts.dedup();
    fonts
}

/// `assert_pdf_contains_text!(pdf, "DISHES")`: some text run contains the needle.
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $needle:expr) => {{
        let text = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(text.contains($needle), "missing {:?} in document text:\n{}", $needle, text);
    }};
}

/// Negated form of `assert_pdf_contains_text!`.
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $needle:expr) => {{
        let text = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(!text.contains($needle), "unexpected {:?} in document text:\n{}", $needle, text);
    }};
}

#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $expected:expr) => {{
        let pages = $pdf.page_count();
        assert_eq!(pages, $expected, "page count");
    }};
}

#[macro_export]
macro_rules! assert_pdf_has_font {
    ($pdf:expr, $font:expr) => {{
        let fonts = $crate::common::pdf_assertions::font_names(&$pdf.doc);
        assert!(fonts.iter().any(|f| f == $font), "font {:?} not among {:?}", $font, fonts);
    }};
}
