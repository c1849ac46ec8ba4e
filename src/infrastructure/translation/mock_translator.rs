use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{Translator, TranslatorError};
use crate::domain::SourceLanguage;

/// Echoes each chunk back unchanged and counts the chunks it was given.
#[derive(Debug, Default)]
pub struct MockTranslator {
    calls: AtomicUsize,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        chunk: &str,
        _source: SourceLanguage,
    ) -> Result<String, TranslatorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(chunk.to_string())
    }
}
