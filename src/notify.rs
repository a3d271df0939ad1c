// src/notify.rs
use serde::Serialize;
use thiserror::Error;

pub const REPORTS_CHANNEL: &str = "reports";
pub const REPORT_GENERATED: &str = "report_generated";

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification transport failed: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEventData {
    pub resource: String,
    pub format: String,
    pub filename: String,
    /// ISO 8601 local time the report was generated at.
    pub timestamp: String,
}

/// Published after a report has been rendered successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEvent {
    pub channel: String,
    pub event: String,
    pub data: ReportEventData,
}

impl ReportEvent {
    pub fn generated(data: ReportEventData) -> Self {
        Self { channel: REPORTS_CHANNEL.into(), event: REPORT_GENERATED.into(), data }
    }
}

/// Post-render side channel. A host plugs in its own transport; failures never fail the report.
pub trait ReportNotifier: Send + Sync {
    fn notify(&self, event: &ReportEvent) -> Result<(), NotifyError>;
}
