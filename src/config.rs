// src/config.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tally_executor::{ExecutorImpl, SyncExecutor};
use tally_layout::{DocumentTheme, PageGeometry};
use tally_render_xlsx::WorkbookTheme;
use tally_tabular::SerializerConfig;
use tally_types::{Labels, ReportFormat};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration from '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// An enum to select how batches of requests are executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorKind {
    /// One request after another on the calling thread.
    Sync,
    /// Work-stealing pool; requires the `rayon-executor` feature.
    #[default]
    Rayon,
}

impl ExecutorKind {
    pub fn build(self) -> ExecutorImpl {
        match self {
            ExecutorKind::Sync => ExecutorImpl::Sync(SyncExecutor::new()),
            #[cfg(feature = "rayon-executor")]
            ExecutorKind::Rayon => ExecutorImpl::Rayon(tally_executor::RayonExecutor::new()),
            #[cfg(not(feature = "rayon-executor"))]
            ExecutorKind::Rayon => {
                log::warn!("Rayon executor requested but the 'rayon-executor' feature is disabled; running sequentially");
                ExecutorImpl::Sync(SyncExecutor::new())
            }
        }
    }
}

/// Suggested download filenames per format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filenames {
    pub document: String,
    pub workbook: String,
}

impl Default for Filenames {
    fn default() -> Self {
        Self { document: "reporte.pdf".into(), workbook: "reporte.xlsx".into() }
    }
}

impl Filenames {
    pub fn for_format(&self, format: ReportFormat) -> &str {
        match format {
            ReportFormat::Document => &self.document,
            ReportFormat::Workbook => &self.workbook,
        }
    }
}

/// Everything a `ReportService` can be configured with. Every field is optional in JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportConfig {
    pub page: PageGeometry,
    pub theme: DocumentTheme,
    pub workbook_theme: WorkbookTheme,
    pub labels: Labels,
    pub serializer: SerializerConfig,
    /// Resource names requests may ask for. `None` accepts any name.
    pub resources: Option<Vec<String>>,
    pub filenames: Filenames,
    pub executor: ExecutorKind,
}

impl ReportConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ReportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        log::debug!("Loaded report configuration from {}", path.display());
        Self::from_json(&json)
    }

    /// Rejects values no report could be laid out with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let page = &self.page;
        if page.content_width() <= 0.0 || page.page_size.height <= 2.0 * page.margin {
            return Err(ConfigError::Invalid(format!(
                "margin {} leaves no room on a {}x{} page",
                page.margin, page.page_size.width, page.page_size.height
            )));
        }
        if page.break_threshold >= page.top() {
            return Err(ConfigError::Invalid(format!(
                "break threshold {} is above the top margin ({})",
                page.break_threshold,
                page.top()
            )));
        }
        if page.header_clip == 0 || page.cell_clip == 0 {
            return Err(ConfigError::Invalid("clip limits must be at least 1".into()));
        }
        if self.serializer.max_depth == 0 {
            return Err(ConfigError::Invalid("serializer.maxDepth must be at least 1".into()));
        }
        if self.filenames.document.trim().is_empty() || self.filenames.workbook.trim().is_empty() {
            return Err(ConfigError::Invalid("filenames must not be empty".into()));
        }
        let blank_resource = self.resources.iter().flatten().any(|r| r.trim().is_empty());
        if blank_resource {
            return Err(ConfigError::Invalid("resource names must not be empty".into()));
        }
        Ok(())
    }
}
