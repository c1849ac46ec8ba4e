use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::application::ports::{Translator, TranslatorError};
use crate::application::services::sentence_chunker::split_sentences;
use crate::domain::SourceLanguage;

/// What happens to the document when a single chunk cannot be translated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkFailurePolicy {
    /// Fail the whole document on the first failed chunk.
    Abort,
    /// Keep going and leave an inline marker where the chunk was.
    #[default]
    MarkAndContinue,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("chunk {index} failed: {source}")]
    ChunkFailed {
        index: usize,
        #[source]
        source: TranslatorError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedText {
    pub text: String,
    pub chunk_count: usize,
    pub failed_chunks: usize,
}

pub fn failure_marker(reason: &str) -> String {
    format!("[translation failed: {}]", reason)
}

pub struct TranslationService {
    translator: Arc<dyn Translator>,
    policy: ChunkFailurePolicy,
    chunk_timeout: Duration,
}

impl TranslationService {
    pub fn new(
        translator: Arc<dyn Translator>,
        policy: ChunkFailurePolicy,
        chunk_timeout: Duration,
    ) -> Self {
        Self {
            translator,
            policy,
            chunk_timeout,
        }
    }

    /// Translates sentence chunks in order and joins them with single spaces.
    /// English input is returned untouched without calling the translator.
    #[tracing::instrument(skip(self, text), fields(language = %source, chars = text.len()))]
    pub async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
    ) -> Result<TranslatedText, TranslationError> {
        if source == SourceLanguage::English {
            return Ok(TranslatedText {
                text: text.to_string(),
                chunk_count: 0,
                failed_chunks: 0,
            });
        }

        let chunks = split_sentences(text);
        let mut translated = Vec::with_capacity(chunks.len());
        let mut failed_chunks = 0;

        for (index, chunk) in chunks.iter().enumerate() {
            match self.translate_chunk(chunk, source).await {
                Ok(english) => translated.push(english.trim().to_string()),
                Err(e) => {
                    tracing::warn!(chunk = index, error = %e, "Chunk translation failed");
                    match self.policy {
                        ChunkFailurePolicy::Abort => {
                            return Err(TranslationError::ChunkFailed { index, source: e });
                        }
                        ChunkFailurePolicy::MarkAndContinue => {
                            failed_chunks += 1;
                            translated.push(failure_marker(&e.to_string()));
                        }
                    }
                }
            }
        }

        tracing::debug!(
            chunks = chunks.len(),
            failed = failed_chunks,
            "Translation finished"
        );

        Ok(TranslatedText {
            text: translated.join(" "),
            chunk_count: chunks.len(),
            failed_chunks,
        })
    }

    async fn translate_chunk(
        &self,
        chunk: &str,
        source: SourceLanguage,
    ) -> Result<String, TranslatorError> {
        tokio::time::timeout(self.chunk_timeout, self.translator.translate(chunk, source))
            .await
            .map_err(|_| TranslatorError::TimedOut(self.chunk_timeout.as_millis() as u64))?
    }
}
