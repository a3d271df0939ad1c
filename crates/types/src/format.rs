use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The two output formats the engine can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Paginated printable document (PDF).
    Document,
    /// Spreadsheet workbook (XLSX), one sheet per table.
    Workbook,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported report format '{0}' (expected pdf or excel)")]
pub struct UnknownFormat(pub String);

impl ReportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ReportFormat::Document => "application/pdf",
            ReportFormat::Workbook => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// The short name used in request paths and events.
    pub fn as_str(self) -> &'static str {
        match self {
            ReportFormat::Document => "pdf",
            ReportFormat::Workbook => "excel",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" | "document" => Ok(ReportFormat::Document),
            "excel" | "xlsx" | "workbook" => Ok(ReportFormat::Workbook),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("PDF".parse::<ReportFormat>(), Ok(ReportFormat::Document));
        assert_eq!("excel".parse::<ReportFormat>(), Ok(ReportFormat::Workbook));
        assert_eq!("xlsx".parse::<ReportFormat>(), Ok(ReportFormat::Workbook));
        assert_eq!("csv".parse::<ReportFormat>(), Err(UnknownFormat("csv".into())));
    }

    #[test]
    fn mime_types() {
        assert_eq!(ReportFormat::Document.mime_type(), "application/pdf");
        assert!(ReportFormat::Workbook.mime_type().ends_with("spreadsheetml.sheet"));
    }
}
