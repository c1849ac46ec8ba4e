use async_trait::async_trait;

use crate::application::ports::{SourceExtractor, SourceExtractorError};
use crate::domain::SourceInput;

use super::text_sanitizer::sanitize_extracted_text;

/// Pasted article text. Only whitespace and Unicode form are cleaned up.
pub struct PlainTextAdapter;

#[async_trait]
impl SourceExtractor for PlainTextAdapter {
    async fn extract_text(&self, input: &SourceInput) -> Result<String, SourceExtractorError> {
        let SourceInput::Text(text) = input else {
            return Err(SourceExtractorError::UnsupportedSource(input.modality()));
        };

        let cleaned = sanitize_extracted_text(text);
        if cleaned.is_empty() {
            return Err(SourceExtractorError::NoTextFound("pasted text".to_string()));
        }
        Ok(cleaned)
    }
}
