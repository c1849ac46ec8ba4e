use crate::application::ports::{SourceExtractor, SourceExtractorError};
use crate::domain::SourceInput;

pub const MOCK_ARTICLE: &str = "The central bank held interest rates steady on Tuesday. \
Officials in Mumbai said inflation was easing and markets rose after the announcement. \
Analysts expect profits at large lenders to improve next quarter.";

/// Returns pasted text as-is and a canned article for every other source.
pub struct MockSourceExtractor;

#[async_trait::async_trait]
impl SourceExtractor for MockSourceExtractor {
    async fn extract_text(&self, input: &SourceInput) -> Result<String, SourceExtractorError> {
        match input {
            SourceInput::Text(text) => Ok(text.clone()),
            _ => Ok(MOCK_ARTICLE.to_string()),
        }
    }
}
