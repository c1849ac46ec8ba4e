use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::ExportRequest;

#[async_trait]
pub trait ReportExporter: Send + Sync {
    /// Writes the report and returns the path of the produced file.
    async fn export(&self, request: &ExportRequest) -> Result<PathBuf, ReportExporterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ReportExporterError {
    #[error("rendering failed: {0}")]
    RenderFailed(String),
    #[error("output file missing after write: {0}")]
    OutputMissing(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
