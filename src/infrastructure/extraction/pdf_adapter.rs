use std::io::Write;
use std::path::Path;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{SourceExtractor, SourceExtractorError};
use crate::domain::SourceInput;

use super::text_sanitizer::sanitize_extracted_text;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Reads the embedded text layer of an uploaded PDF. Scanned PDFs without a
/// text layer yield `NoTextFound`.
#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(path: &Path) -> Result<Vec<String>, SourceExtractorError> {
        let mut doc = PdfDocument::open(path).map_err(|e| {
            SourceExtractorError::ExtractionFailed(format!("failed to parse PDF: {e}"))
        })?;

        let page_count = doc.page_count().map_err(|e| {
            SourceExtractorError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            match doc.extract_text(page_index) {
                Ok(text) if !text.trim().is_empty() => pages.push(text),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(page = page_index + 1, error = %e, "Skipping unreadable PDF page");
                }
            }
        }

        Ok(pages)
    }
}

#[async_trait]
impl SourceExtractor for PdfAdapter {
    #[tracing::instrument(skip(self, input), fields(bytes = input.size_bytes()))]
    async fn extract_text(&self, input: &SourceInput) -> Result<String, SourceExtractorError> {
        let SourceInput::Pdf(data) = input else {
            return Err(SourceExtractorError::UnsupportedSource(input.modality()));
        };

        if !data.starts_with(PDF_MAGIC) {
            return Err(SourceExtractorError::InvalidInput(
                "upload is not a PDF document".to_string(),
            ));
        }

        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            SourceExtractorError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;
        temp_file.write_all(data).map_err(|e| {
            SourceExtractorError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();
        let pages = tokio::task::spawn_blocking(move || Self::extract_pages(&temp_path))
            .await
            .map_err(|e| SourceExtractorError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");

        let sanitized_pages: Vec<String> = pages
            .iter()
            .map(|page| sanitize_extracted_text(page))
            .filter(|text| !text.is_empty())
            .collect();

        if sanitized_pages.is_empty() {
            return Err(SourceExtractorError::NoTextFound("PDF text layer".to_string()));
        }

        Ok(sanitized_pages.join("\n\n"))
    }
}
