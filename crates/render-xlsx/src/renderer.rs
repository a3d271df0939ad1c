use crate::error::WorkbookError;
use crate::sheet_name::SheetNames;
use crate::theme::WorkbookTheme;
use rust_xlsxwriter::{
    Color as XlsxColor, ColNum, DocProperties, Format, FormatAlign, FormatBorder, RowNum, Workbook, Worksheet,
};
use tally_render_core::{RenderContext, RenderError, ReportRenderer};
use tally_tabular::text::{capitalize, char_len};
use tally_types::{Color, ReportFormat, Table};

const TITLE_ROW: RowNum = 0;
const HEADER_ROW: RowNum = 2;
const FIRST_DATA_ROW: RowNum = 3;
const TITLE_HEIGHT: f64 = 30.0;
const HEADER_HEIGHT: f64 = 25.0;
const TITLE_SIZE: f64 = 16.0;
const FOOTER_SIZE: f64 = 9.0;
const MIN_COLUMN_WIDTH: usize = 12;
const MAX_COLUMN_WIDTH: usize = 50;
/// Last row index `rust_xlsxwriter` accepts.
const MAX_ROW: RowNum = 1_048_575;
/// Last column index `rust_xlsxwriter` accepts (`XFD`).
const MAX_COL: ColNum = 16_383;
/// Title, spacer and header above the data; spacer and footer below it.
const FRAME_ROWS: u64 = 5;

/// Checks a table fits on one worksheet and returns its last column index.
fn sheet_extent(name: &str, rows: usize, columns: usize) -> Result<ColNum, WorkbookError> {
    if rows as u64 + FRAME_ROWS > MAX_ROW as u64 + 1 {
        return Err(WorkbookError::TooManyRows(name.to_string()));
    }
    let last_col = ColNum::try_from(columns.max(1) - 1)
        .ok()
        .filter(|col| *col <= MAX_COL)
        .ok_or_else(|| WorkbookError::TooManyColumns(name.to_string()))?;
    Ok(last_col)
}

fn xlsx_color(color: Color) -> XlsxColor {
    XlsxColor::RGB(color.to_rgb_u32())
}

/// Cell formats resolved once per render from the theme.
struct Formats {
    title: Format,
    header: Format,
    body: Format,
    body_striped: Format,
    muted: Format,
}

impl Formats {
    fn new(theme: &WorkbookTheme) -> Self {
        let body = Format::new()
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(xlsx_color(theme.body_border));
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(TITLE_SIZE)
                .set_font_color(xlsx_color(theme.title_text))
                .set_background_color(xlsx_color(theme.title_fill))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            header: Format::new()
                .set_bold()
                .set_font_color(xlsx_color(theme.header_text))
                .set_background_color(xlsx_color(theme.header_fill))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(xlsx_color(theme.header_border)),
            body_striped: body.clone().set_background_color(xlsx_color(theme.stripe)),
            body,
            muted: Format::new()
                .set_italic()
                .set_font_size(FOOTER_SIZE)
                .set_font_color(xlsx_color(theme.muted_text)),
        }
    }
}

/// Renders each table as its own worksheet: title, header band, striped rows
/// and a footer with the record count and generation time.
#[derive(Debug, Clone, Default)]
pub struct WorkbookRenderer {
    theme: WorkbookTheme,
}

impl WorkbookRenderer {
    pub fn new(theme: WorkbookTheme) -> Self {
        Self { theme }
    }

    fn build(&self, tables: &[Table], ctx: &RenderContext) -> Result<Vec<u8>, WorkbookError> {
        let mut workbook = Workbook::new();
        let title = tables
            .first()
            .map(|t| ctx.labels.sheet_title(&t.name.to_uppercase()))
            .unwrap_or_default();
        let properties = DocProperties::new().set_author(&self.theme.author).set_title(&title);
        workbook.set_properties(&properties);

        let formats = Formats::new(&self.theme);
        let mut names = SheetNames::new();

        if tables.is_empty() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(names.assign(&ctx.labels.empty_sheet_name, 1))?;
            worksheet.write_string_with_format(0, 0, &ctx.labels.no_data, &formats.muted)?;
        }

        for (index, table) in tables.iter().enumerate() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(names.assign(&table.name, index + 1))?;
            self.write_table(worksheet, table, ctx, &formats)?;
        }

        let buffer = workbook.save_to_buffer()?;
        log::info!(
            "Rendered workbook report: {} sheet(s), {} bytes",
            tables.len().max(1),
            buffer.len()
        );
        Ok(buffer)
    }

    fn write_table(
        &self,
        worksheet: &mut Worksheet,
        table: &Table,
        ctx: &RenderContext,
        formats: &Formats,
    ) -> Result<(), WorkbookError> {
        if table.is_empty() {
            worksheet.write_string_with_format(0, 0, &ctx.labels.no_data, &formats.muted)?;
            return Ok(());
        }
        let headers = table.headers();
        let last_col = sheet_extent(&table.name, table.row_count(), headers.len())?;

        let title = ctx.labels.sheet_title(&table.name.to_uppercase());
        if last_col == 0 {
            worksheet.write_string_with_format(TITLE_ROW, 0, &title, &formats.title)?;
        } else {
            worksheet.merge_range(TITLE_ROW, 0, TITLE_ROW, last_col, &title, &formats.title)?;
        }
        worksheet.set_row_height(TITLE_ROW, TITLE_HEIGHT)?;

        let mut widths: Vec<usize> = headers.iter().map(|h| char_len(h)).collect();
        for (col, header) in headers.iter().enumerate() {
            worksheet.write_string_with_format(HEADER_ROW, col as ColNum, &capitalize(header), &formats.header)?;
        }
        worksheet.set_row_height(HEADER_ROW, HEADER_HEIGHT)?;

        let mut row = FIRST_DATA_ROW;
        for (index, record) in table.rows.iter().enumerate() {
            let format = if index % 2 == 0 { &formats.body_striped } else { &formats.body };
            for (col, cell) in ctx.serializer.serialize_row(record, &headers).iter().enumerate() {
                widths[col] = widths[col].max(char_len(cell));
                worksheet.write_string_with_format(row, col as ColNum, cell, format)?;
            }
            row += 1;
        }

        for (col, width) in widths.iter().enumerate() {
            let width = (width + 2).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
            worksheet.set_column_width(col as ColNum, width as f64)?;
        }

        let footer_row = row + 1;
        let stamp_col = if last_col == 0 { 1 } else { last_col };
        worksheet.write_string_with_format(footer_row, 0, &ctx.labels.sheet_total(table.row_count()), &formats.muted)?;
        worksheet.write_string_with_format(
            footer_row,
            stamp_col,
            &ctx.labels.generated(&ctx.long_timestamp()),
            &formats.muted,
        )?;

        worksheet.set_freeze_panes(FIRST_DATA_ROW, 0)?;
        log::debug!(
            "Wrote sheet for table '{}' ({} rows, {} columns)",
            table.name,
            table.row_count(),
            headers.len()
        );
        Ok(())
    }
}

impl ReportRenderer for WorkbookRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Workbook
    }

    fn render(&self, tables: &[Table], ctx: &RenderContext) -> Result<Vec<u8>, RenderError> {
        Ok(self.build(tables, ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use std::io::Cursor;
    use tally_tabular::{extract_tables, ValueSerializer};
    use tally_types::Labels;

    fn context() -> RenderContext {
        let at = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(14, 3, 22).unwrap();
        RenderContext::new(Labels::default(), ValueSerializer::default(), at)
    }

    fn render(tree: Value) -> Xlsx<Cursor<Vec<u8>>> {
        let tables = extract_tables(&tree);
        let bytes = WorkbookRenderer::default().render(&tables, &context()).unwrap();
        open_workbook_from_rs(Cursor::new(bytes)).unwrap()
    }

    fn cell(range: &Range<Data>, row: u32, col: u32) -> String {
        match range.get_value((row, col)) {
            Some(Data::String(s)) => s.clone(),
            _ => String::new(),
        }
    }

    #[test]
    fn dishes_sheet_has_title_header_rows_and_footer() {
        let mut wb = render(json!({"dishes": [
            {"id": "1", "name": "Taco", "price": 3.5},
            {"id": "2", "name": "Soda", "price": 1.0}
        ]}));
        assert_eq!(wb.sheet_names(), vec!["dishes".to_string()]);
        let range = wb.worksheet_range("dishes").unwrap();

        assert_eq!(cell(&range, 0, 0), "Report: DISHES");
        assert_eq!(cell(&range, 1, 0), "");
        assert_eq!(
            (0..3).map(|c| cell(&range, 2, c)).collect::<Vec<_>>(),
            vec!["Id", "Name", "Price"]
        );
        assert_eq!(
            (0..3).map(|c| cell(&range, 3, c)).collect::<Vec<_>>(),
            vec!["1", "Taco", "3.5"]
        );
        assert_eq!(cell(&range, 4, 2), "1");
        assert_eq!(cell(&range, 5, 0), "");
        assert_eq!(cell(&range, 6, 0), "Total records: 2");
        assert_eq!(cell(&range, 6, 2), "Generated: 19/10/2026, 14:03:22");
    }

    #[test]
    fn one_sheet_per_table_in_order() {
        let wb = render(json!({"b": [{"x": 1}], "a": {"y": 2}, "skip": 3, "c": []}));
        assert_eq!(wb.sheet_names(), vec!["b", "a", "c"]);
    }

    #[test]
    fn empty_table_gets_only_a_notice() {
        let mut wb = render(json!({"waiters": []}));
        let range = wb.worksheet_range("waiters").unwrap();
        assert_eq!(cell(&range, 0, 0), "No data available");
        assert_eq!(range.height(), 1);
    }

    #[test]
    fn empty_result_still_yields_a_workbook() {
        let mut wb = render(json!({}));
        assert_eq!(wb.sheet_names(), vec!["Report".to_string()]);
        let range = wb.worksheet_range("Report").unwrap();
        assert_eq!(cell(&range, 0, 0), "No data available");
    }

    #[test]
    fn single_column_table_puts_timestamp_in_second_column() {
        let mut wb = render(json!({"ids": [{"id": 1}, {"id": 2}, {"id": 3}]}));
        let range = wb.worksheet_range("ids").unwrap();
        assert_eq!(cell(&range, 0, 0), "Report: IDS");
        assert_eq!(cell(&range, 7, 0), "Total records: 3");
        assert_eq!(cell(&range, 7, 1), "Generated: 19/10/2026, 14:03:22");
    }

    #[test]
    fn sheet_extent_enforces_worksheet_limits() {
        assert_eq!(sheet_extent("t", 10, 1).unwrap(), 0);
        assert_eq!(sheet_extent("t", 10, 16_384).unwrap(), 16_383);
        assert_eq!(sheet_extent("t", 1_048_571, 3).unwrap(), 2);
        assert!(matches!(sheet_extent("t", 1_048_572, 3), Err(WorkbookError::TooManyRows(name)) if name == "t"));
        assert!(matches!(sheet_extent("t", 1, 16_385), Err(WorkbookError::TooManyColumns(_))));
        assert!(matches!(sheet_extent("t", 1, 65_537), Err(WorkbookError::TooManyColumns(_))));
    }

    #[test]
    fn too_many_columns_is_a_render_error() {
        let record: serde_json::Map<String, Value> =
            (0..16_385).map(|i| (format!("c{}", i), Value::from(i))).collect();
        let tables = extract_tables(&json!({ "wide": [record] }));
        let err = WorkbookRenderer::default().render(&tables, &context()).unwrap_err();
        assert!(matches!(err, RenderError::Workbook(_)));
        assert!(err.to_string().contains("wide"));
    }

    #[test]
    fn long_and_colliding_names_are_made_valid() {
        let wb = render(json!({
            "reservations_by_restaurant_and_day_2026": [{"id": 1}],
            "Menu": [{"id": 1}],
            "menu": [{"id": 2}]
        }));
        assert_eq!(
            wb.sheet_names(),
            vec!["reservations_by_restaurant_and_", "Menu", "menu_2"]
        );
    }
}
