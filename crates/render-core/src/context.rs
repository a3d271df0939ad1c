use chrono::NaiveDateTime;
use std::fmt::Write;
use tally_tabular::ValueSerializer;
use tally_types::Labels;

/// Per-request inputs shared by every backend.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub labels: Labels,
    pub serializer: ValueSerializer,
    /// Local wall-clock time the report is stamped with.
    pub generated_at: NaiveDateTime,
}

impl RenderContext {
    pub fn new(labels: Labels, serializer: ValueSerializer, generated_at: NaiveDateTime) -> Self {
        Self { labels, serializer, generated_at }
    }

    pub fn short_date(&self) -> String {
        self.format_with(&self.labels.short_date_format)
    }

    pub fn long_timestamp(&self) -> String {
        self.format_with(&self.labels.long_date_format)
    }

    /// Formats `generated_at`, falling back to ISO 8601 when `pattern` is not a valid
    /// chrono format string (chrono reports those as a `fmt::Error`).
    fn format_with(&self, pattern: &str) -> String {
        let mut out = String::new();
        if write!(out, "{}", self.generated_at.format(pattern)).is_err() {
            log::warn!("Invalid date format '{}'; falling back to ISO 8601", pattern);
            out = self.generated_at.format("%Y-%m-%dT%H:%M:%S").to_string();
        }
        out
    }
}
