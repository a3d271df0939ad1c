// src/service.rs
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::notify::{ReportEvent, ReportEventData, ReportNotifier};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tally_executor::{Executor, ExecutorImpl};
use tally_render_core::{RenderContext, ReportRenderer};
use tally_render_lopdf::LopdfRenderer;
use tally_render_xlsx::WorkbookRenderer;
use tally_tabular::{extract_tables, ValueSerializer};
use tally_types::{QueryResult, ReportFormat, Table};

/// Resource name used by [`ReportService::resolve`], which has no request context.
pub const DEFAULT_RESOURCE: &str = "report";

/// A finished report, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub filename: String,
}

/// A named report request: which resource, which output format, and the query result to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub resource: String,
    /// `pdf` or `excel` (see `ReportFormat`'s `FromStr` for accepted aliases).
    pub format: String,
    pub result: QueryResult,
    /// Date the caller filtered the query by. Echoed back by `describe`, never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl ReportRequest {
    pub fn new(resource: impl Into<String>, format: impl Into<String>, result: QueryResult) -> Self {
        Self { resource: resource.into(), format: format.into(), result, date: None }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// What "meta" mode reports instead of the bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub resource: String,
    pub format: String,
    pub bytes: usize,
    pub tables: usize,
    pub rows: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

struct ServiceInner {
    config: ReportConfig,
    serializer: ValueSerializer,
    document: LopdfRenderer,
    workbook: WorkbookRenderer,
    notifier: Option<Arc<dyn ReportNotifier>>,
    executor: ExecutorImpl,
}

/// Validates query results and renders them as documents or workbooks.
///
/// Immutable once built and cheap to clone; every call owns its own tables,
/// layout state and output buffer.
#[derive(Clone)]
pub struct ReportService {
    inner: Arc<ServiceInner>,
}

impl std::fmt::Debug for ReportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportService")
            .field("config", &self.inner.config)
            .field("notifier", &self.inner.notifier.is_some())
            .field("executor", &self.inner.executor.name())
            .finish()
    }
}

impl ReportService {
    pub fn builder() -> ReportServiceBuilder {
        ReportServiceBuilder::new()
    }

    pub fn config(&self) -> &ReportConfig {
        &self.inner.config
    }

    /// Renders `result` in `format`.
    ///
    /// Query errors win over data, and a result without data is rejected
    /// before any extraction happens.
    pub fn resolve(&self, result: &QueryResult, format: ReportFormat) -> Result<RenderedReport, ReportError> {
        let (report, _) = self.render(result, format, Local::now().naive_local())?;
        self.announce(DEFAULT_RESOURCE, format, &report.filename);
        Ok(report)
    }

    /// Like [`resolve`](Self::resolve), but first checks the request's format string
    /// and resource name.
    pub fn resolve_request(&self, request: &ReportRequest) -> Result<RenderedReport, ReportError> {
        let format = self.check(&request.resource, &request.format)?;
        let (report, _) = self.render(&request.result, format, Local::now().naive_local())?;
        self.announce(&request.resource, format, &report.filename);
        Ok(report)
    }

    /// Renders the request and summarizes the output instead of returning it.
    pub fn describe(&self, request: &ReportRequest) -> Result<ReportSummary, ReportError> {
        let format = self.check(&request.resource, &request.format)?;
        let (report, tables) = self.render(&request.result, format, Local::now().naive_local())?;
        self.announce(&request.resource, format, &report.filename);
        Ok(ReportSummary {
            resource: request.resource.clone(),
            format: format.as_str().to_string(),
            bytes: report.bytes.len(),
            tables: tables.len(),
            rows: tables.iter().map(Table::row_count).sum(),
            date: request.date.clone(),
        })
    }

    /// Validates a resource/format pair without rendering anything.
    pub fn check(&self, resource: &str, format: &str) -> Result<ReportFormat, ReportError> {
        let format: ReportFormat = format.parse()?;
        if let Some(allowed) = &self.inner.config.resources {
            if !allowed.iter().any(|r| r == resource) {
                return Err(ReportError::UnsupportedResource(resource.to_string()));
            }
        }
        Ok(format)
    }

    /// The configured resource allow-list; empty when any name is accepted.
    pub fn resources(&self) -> &[String] {
        self.inner.config.resources.as_deref().unwrap_or(&[])
    }

    /// Resolves independent requests through the configured executor.
    /// Results come back in request order; one failure does not affect the others.
    pub fn resolve_batch(&self, requests: Vec<ReportRequest>) -> Vec<Result<RenderedReport, ReportError>> {
        log::debug!(
            "Resolving {} report request(s) with the {} executor",
            requests.len(),
            self.inner.executor.name()
        );
        let service = self.clone();
        self.inner
            .executor
            .run_batch(requests, move |request| service.resolve_request(&request))
    }

    fn render(
        &self,
        result: &QueryResult,
        format: ReportFormat,
        generated_at: NaiveDateTime,
    ) -> Result<(RenderedReport, Vec<Table>), ReportError> {
        if result.has_errors() {
            return Err(ReportError::Query(result.error_messages()));
        }
        let data = result.data().ok_or(ReportError::EmptyResult)?;

        let tables = extract_tables(data);
        let ctx = RenderContext::new(self.inner.config.labels.clone(), self.inner.serializer.clone(), generated_at);
        let bytes = self.renderer(format).render(&tables, &ctx)?;
        let report = RenderedReport {
            bytes,
            mime_type: format.mime_type(),
            filename: self.inner.config.filenames.for_format(format).to_string(),
        };
        Ok((report, tables))
    }

    fn renderer(&self, format: ReportFormat) -> &dyn ReportRenderer {
        match format {
            ReportFormat::Document => &self.inner.document,
            ReportFormat::Workbook => &self.inner.workbook,
        }
    }

    fn announce(&self, resource: &str, format: ReportFormat, filename: &str) {
        let Some(notifier) = &self.inner.notifier else {
            return;
        };
        let event = ReportEvent::generated(ReportEventData {
            resource: resource.to_string(),
            format: format.as_str().to_string(),
            filename: filename.to_string(),
            timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
        });
        if let Err(e) = notifier.notify(&event) {
            log::warn!("Could not send report notification for '{}': {}", resource, e);
        }
    }
}

/// A builder for creating a `ReportService`.
#[derive(Default)]
pub struct ReportServiceBuilder {
    config: ReportConfig,
    notifier: Option<Arc<dyn ReportNotifier>>,
    executor: Option<ExecutorImpl>,
}

impl ReportServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the configuration from a JSON file.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ReportError> {
        self.config = ReportConfig::from_file(path)?;
        Ok(self)
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn ReportNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Overrides the executor selected by the configuration.
    pub fn with_executor(mut self, executor: ExecutorImpl) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Consumes the builder, validating the configuration.
    pub fn build(self) -> Result<ReportService, ReportError> {
        self.config.validate()?;
        let config = self.config;
        let executor = self.executor.unwrap_or_else(|| config.executor.build());
        log::debug!("Building report service with the {} executor", executor.name());

        let inner = ServiceInner {
            serializer: ValueSerializer::new(config.serializer.clone()),
            document: LopdfRenderer::new(config.page, config.theme.clone()),
            workbook: WorkbookRenderer::new(config.workbook_theme.clone()),
            notifier: self.notifier,
            executor,
            config,
        };
        Ok(ReportService { inner: Arc::new(inner) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotifyError;
    use serde_json::json;
    use std::sync::Mutex;
    use tally_executor::SyncExecutor;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<ReportEvent>>,
    }

    impl ReportNotifier for Recorder {
        fn notify(&self, event: &ReportEvent) -> Result<(), NotifyError> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    struct Failing;

    impl ReportNotifier for Failing {
        fn notify(&self, _event: &ReportEvent) -> Result<(), NotifyError> {
            Err(NotifyError::Transport("connection refused".into()))
        }
    }

    fn dishes() -> QueryResult {
        QueryResult::from_data(json!({"dishes": [
            {"id": "1", "name": "Taco", "price": 3.5},
            {"id": "2", "name": "Soda", "price": 1.0}
        ]}))
    }

    fn service_with_resources(resources: &[&str]) -> ReportService {
        let config = ReportConfig {
            resources: Some(resources.iter().map(|r| r.to_string()).collect()),
            ..ReportConfig::default()
        };
        ReportService::builder().with_config(config).build().unwrap()
    }

    #[test]
    fn query_errors_are_reported_verbatim() {
        let service = ReportService::builder().build().unwrap();
        let result = QueryResult::from_errors(["Cannot query field 'x'", "Second"]);
        match service.resolve(&result, ReportFormat::Document) {
            Err(ReportError::Query(messages)) => assert_eq!(messages, vec!["Cannot query field 'x'", "Second"]),
            other => panic!("expected a query error, got {:?}", other),
        }
    }

    #[test]
    fn missing_or_null_data_is_empty_result() {
        let service = ReportService::builder().build().unwrap();
        for result in [QueryResult::default(), QueryResult::from_data(serde_json::Value::Null)] {
            let err = service.resolve(&result, ReportFormat::Workbook).unwrap_err();
            assert!(matches!(err, ReportError::EmptyResult));
        }
    }

    #[test]
    fn resolve_sets_mime_type_and_filename() {
        let service = ReportService::builder().build().unwrap();
        let pdf = service.resolve(&dishes(), ReportFormat::Document).unwrap();
        assert_eq!(pdf.mime_type, "application/pdf");
        assert_eq!(pdf.filename, "reporte.pdf");
        assert!(pdf.bytes.starts_with(b"%PDF"));

        let xlsx = service.resolve(&dishes(), ReportFormat::Workbook).unwrap();
        assert_eq!(xlsx.filename, "reporte.xlsx");
        assert!(xlsx.bytes.starts_with(b"PK"));
    }

    #[test]
    fn requests_are_validated_before_rendering() {
        let service = service_with_resources(&["dishes"]);
        let bad_format = ReportRequest::new("dishes", "csv", dishes());
        assert!(matches!(service.resolve_request(&bad_format), Err(ReportError::UnsupportedFormat(f)) if f == "csv"));

        // An unknown resource is rejected even when the result itself carries errors.
        let bad_resource = ReportRequest::new("payroll", "pdf", QueryResult::from_errors(["x"]));
        assert!(matches!(
            service.resolve_request(&bad_resource),
            Err(ReportError::UnsupportedResource(r)) if r == "payroll"
        ));
        assert_eq!(service.resources(), ["dishes".to_string()]);
    }

    #[test]
    fn describe_counts_tables_and_rows() {
        let service = ReportService::builder().build().unwrap();
        let summary = service.describe(&ReportRequest::new("dishes", "excel", dishes())).unwrap();
        assert_eq!(summary.format, "excel");
        assert_eq!(summary.tables, 1);
        assert_eq!(summary.rows, 2);
        assert!(summary.bytes > 0);
        assert_eq!(summary.date, None);
    }

    #[test]
    fn describe_echoes_the_request_date() {
        let service = ReportService::builder().build().unwrap();
        let request = ReportRequest::new("dishes", "pdf", dishes()).with_date("2025-10-20");
        let summary = service.describe(&request).unwrap();
        assert_eq!(summary.date.as_deref(), Some("2025-10-20"));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["date"], "2025-10-20");
    }

    #[test]
    fn notifier_receives_generated_events() {
        let recorder = Arc::new(Recorder::default());
        let service = ReportService::builder().with_notifier(recorder.clone()).build().unwrap();
        service.resolve_request(&ReportRequest::new("dishes", "pdf", dishes())).unwrap();

        let events = recorder.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].channel, "reports");
        assert_eq!(events[0].event, "report_generated");
        assert_eq!(events[0].data.resource, "dishes");
        assert_eq!(events[0].data.format, "pdf");
        assert_eq!(events[0].data.filename, "reporte.pdf");
    }

    #[test]
    fn notifier_failures_do_not_fail_the_report() {
        let service = ReportService::builder().with_notifier(Arc::new(Failing)).build().unwrap();
        assert!(service.resolve(&dishes(), ReportFormat::Document).is_ok());
    }

    #[test]
    fn batch_keeps_request_order() {
        let service = ReportService::builder()
            .with_executor(ExecutorImpl::Sync(SyncExecutor::new()))
            .build()
            .unwrap();
        let results = service.resolve_batch(vec![
            ReportRequest::new("a", "pdf", dishes()),
            ReportRequest::new("b", "docx", dishes()),
            ReportRequest::new("c", "excel", dishes()),
        ]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().filename, "reporte.pdf");
        assert!(matches!(results[1], Err(ReportError::UnsupportedFormat(_))));
        assert_eq!(results[2].as_ref().unwrap().filename, "reporte.xlsx");
    }

    #[test]
    fn service_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReportService>();
    }
}
