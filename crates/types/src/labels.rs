use serde::{Deserialize, Serialize};

/// User-facing strings and date formats shared by both report formats.
///
/// Templates use `{name}`, `{count}`, `{page}` and `{timestamp}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Labels {
    pub sheet_title: String,
    pub continued: String,
    pub no_data: String,
    pub page_total: String,
    pub page_number: String,
    pub sheet_total: String,
    pub generated: String,
    /// `chrono` format for the document footer date.
    pub short_date_format: String,
    /// `chrono` format for the workbook generation timestamp.
    pub long_date_format: String,
    /// Name of the placeholder sheet written when there are no tables.
    pub empty_sheet_name: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            sheet_title: "Report: {name}".into(),
            continued: "(continued)".into(),
            no_data: "No data available".into(),
            page_total: "Total: {count} records".into(),
            page_number: "Page {page}".into(),
            sheet_total: "Total records: {count}".into(),
            generated: "Generated: {timestamp}".into(),
            short_date_format: "%d/%m/%Y".into(),
            long_date_format: "%d/%m/%Y, %H:%M:%S".into(),
            empty_sheet_name: "Report".into(),
        }
    }
}

impl Labels {
    pub fn sheet_title(&self, name: &str) -> String {
        self.sheet_title.replace("{name}", name)
    }

    pub fn continued_title(&self, title: &str) -> String {
        format!("{} {}", title, self.continued)
    }

    pub fn page_total(&self, count: usize) -> String {
        self.page_total.replace("{count}", &count.to_string())
    }

    pub fn page_number(&self, page: usize) -> String {
        self.page_number.replace("{page}", &page.to_string())
    }

    pub fn sheet_total(&self, count: usize) -> String {
        self.sheet_total.replace("{count}", &count.to_string())
    }

    pub fn generated(&self, timestamp: &str) -> String {
        self.generated.replace("{timestamp}", timestamp)
    }
}
