use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pdf_oxide::writer::{DocumentBuilder, DocumentMetadata, PageSize};

use crate::application::ports::{ReportExporter, ReportExporterError};
use crate::domain::ExportRequest;

use super::report_layout::{REPORT_TITLE, left_margin, paginate, report_lines, top_of_page};

/// Writes the analysis report as a PDF under a fixed output directory.
pub struct PdfReportExporter {
    output_dir: PathBuf,
    title: String,
}

impl PdfReportExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            title: REPORT_TITLE.to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Lays the report out on A4 pages and returns the PDF bytes.
    pub fn render(request: &ExportRequest, title: &str) -> Result<Vec<u8>, ReportExporterError> {
        let pages = paginate(report_lines(request, title));

        let mut builder = DocumentBuilder::new().metadata(
            DocumentMetadata::new()
                .title(title)
                .subject(request.category.clone())
                .creator("newssense"),
        );

        for lines in pages {
            let mut page = builder
                .page(PageSize::A4)
                .at(left_margin(), top_of_page());
            for line in lines {
                page = page.font(line.font, line.size).text(&line.text);
            }
            page.done();
        }

        builder
            .build()
            .map_err(|e| ReportExporterError::RenderFailed(e.to_string()))
    }
}

#[async_trait]
impl ReportExporter for PdfReportExporter {
    #[tracing::instrument(skip(self, request), fields(filename = %request.filename.as_str()))]
    async fn export(&self, request: &ExportRequest) -> Result<PathBuf, ReportExporterError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let owned = request.clone();
        let title = self.title.clone();
        let bytes = tokio::task::spawn_blocking(move || Self::render(&owned, &title))
            .await
            .map_err(|e| ReportExporterError::RenderFailed(format!("task join error: {e}")))??;

        let path = self.output_dir.join(request.filename.as_str());
        tokio::fs::write(&path, &bytes).await?;

        let written = tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_file() && m.len() > 0)
            .unwrap_or(false);
        if !written {
            return Err(ReportExporterError::OutputMissing(path.display().to_string()));
        }

        tracing::info!(path = %path.display(), bytes = bytes.len(), "Report written");
        Ok(path)
    }
}
