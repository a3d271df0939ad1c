use crate::content::{base_font, font_resource, page_content};
use chrono::NaiveDateTime;
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use tally_layout::{DocumentPaginator, DocumentTheme, FontFace, PageGeometry, PaginatedDocument};
use tally_render_core::{RenderContext, RenderError, ReportRenderer};
use tally_types::{ReportFormat, Table};

const PRODUCER: &str = "Tally";

/// A PDF text string for the document information dictionary. ASCII stays a
/// literal; anything else is UTF-16BE behind a byte order mark.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Renders tables as a paginated PDF using the standard Type 1 fonts.
#[derive(Debug, Clone, Default)]
pub struct LopdfRenderer {
    geometry: PageGeometry,
    theme: DocumentTheme,
}

impl LopdfRenderer {
    pub fn new(geometry: PageGeometry, theme: DocumentTheme) -> Self {
        Self { geometry, theme }
    }

    /// Runs pagination only. Useful for inspecting layout without encoding a PDF.
    pub fn layout(&self, tables: &[Table], ctx: &RenderContext) -> PaginatedDocument {
        DocumentPaginator::new(&self.geometry, &self.theme, &ctx.labels, &ctx.serializer)
            .paginate(tables, &ctx.short_date())
    }

    fn build_document(&self, layout: &PaginatedDocument, title: &str, at: NaiveDateTime) -> Result<Document, RenderError> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for face in [FontFace::Regular, FontFace::Bold, FontFace::Italic] {
            fonts.set(
                font_resource(face),
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => base_font(face),
                    "Encoding" => "WinAnsiEncoding",
                },
            );
        }
        let resources_id = doc.add_object(dictionary! { "Font" => fonts });

        let size = self.geometry.page_size;
        let mut kids: Vec<Object> = Vec::with_capacity(layout.page_count());
        for page in &layout.pages {
            let content = page_content(page);
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), size.width.into(), size.height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }
            .into(),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => text_string(title),
            "Producer" => Object::string_literal(PRODUCER),
            "CreationDate" => Object::string_literal(at.format("D:%Y%m%d%H%M%S").to_string()),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        Ok(doc)
    }
}

impl ReportRenderer for LopdfRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Document
    }

    fn render(&self, tables: &[Table], ctx: &RenderContext) -> Result<Vec<u8>, RenderError> {
        let layout = self.layout(tables, ctx);
        let title = tables.first().map(|t| ctx.labels.sheet_title(&t.name.to_uppercase())).unwrap_or_default();
        let mut doc = self.build_document(&layout, &title, ctx.generated_at)?;

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        log::info!(
            "Rendered PDF report: {} table(s), {} page(s), {} bytes",
            tables.len(),
            layout.page_count(),
            buffer.len()
        );
        Ok(buffer)
    }
}
