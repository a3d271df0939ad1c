#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use calamine::{Data, Range, Reader, Xlsx, open_workbook_from_rs};
use lopdf::Document as LopdfDocument;
use serde_json::Value;
use std::io::Cursor;
use tally::{QueryResult, ReportError, ReportFormat, ReportService};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A rendered PDF report, parsed back for inspection.
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Parses renderer output.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Pages in the page tree.
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text runs of one page (1-based), in drawing order.
    pub fn page_texts(&self, page: u32) -> Vec<String> {
        pdf_assertions::page_texts(&self.doc, page)
    }

    /// Font resources (`F1`, `F2`, …) a page selects, in drawing order.
    pub fn page_fonts(&self, page: u32) -> Vec<String> {
        pdf_assertions::page_font_resources(&self.doc, page)
    }

    /// Dumps the bytes next to the test binary for a manual look.
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("tally_debug_{}.pdf", name), &self.bytes)
    }
}

/// Wrapper around a generated XLSX workbook, read back with calamine.
pub struct GeneratedWorkbook {
    pub bytes: Vec<u8>,
    workbook: Xlsx<Cursor<Vec<u8>>>,
}

impl GeneratedWorkbook {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let workbook = open_workbook_from_rs(Cursor::new(bytes.clone()))?;
        Ok(Self { bytes, workbook })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    pub fn sheet(&mut self, name: &str) -> Result<Range<Data>, Box<dyn std::error::Error>> {
        Ok(self.workbook.worksheet_range(name)?)
    }

    /// Every row of a sheet as display strings; empty cells become "".
    pub fn rows(&mut self, name: &str) -> Result<Vec<Vec<String>>, Box<dyn std::error::Error>> {
        let range = self.sheet(name)?;
        Ok(range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }
}

pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn service() -> ReportService {
    let _ = env_logger::builder().is_test(true).try_init();
    ReportService::builder()
        .build()
        .expect("default configuration is valid")
}

/// Resolve a data tree as a PDF with the default service
pub fn generate_pdf(data: Value) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let report = service().resolve(&QueryResult::from_data(data), ReportFormat::Document)?;
    GeneratedPdf::from_bytes(report.bytes)
}

/// Resolve a data tree as a workbook with the default service
pub fn generate_workbook(data: Value) -> Result<GeneratedWorkbook, Box<dyn std::error::Error>> {
    let report = service().resolve(&QueryResult::from_data(data), ReportFormat::Workbook)?;
    GeneratedWorkbook::from_bytes(report.bytes)
}

pub fn resolve(result: &QueryResult, format: ReportFormat) -> Result<tally::RenderedReport, ReportError> {
    service().resolve(result, format)
}
