use async_trait::async_trait;

use crate::domain::SourceLanguage;

/// Translates one chunk of text into English.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        chunk: &str,
        source: SourceLanguage,
    ) -> Result<String, TranslatorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranslatorError {
    #[error("translation request failed: {0}")]
    RequestFailed(String),
    #[error("invalid translation response: {0}")]
    InvalidResponse(String),
    #[error("translation timed out after {0} ms")]
    TimedOut(u64),
}
