use async_trait::async_trait;

use crate::domain::{SourceInput, SourceModality};

#[async_trait]
pub trait SourceExtractor: Send + Sync {
    async fn extract_text(&self, input: &SourceInput) -> Result<String, SourceExtractorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceExtractorError {
    #[error("unsupported source: {0}")]
    UnsupportedSource(SourceModality),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("fetch failed: {0}")]
    FetchFailed(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
    #[error("extraction timed out after {0} ms")]
    TimedOut(u64),
}
