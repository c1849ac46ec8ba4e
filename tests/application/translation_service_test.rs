use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use newssense::application::ports::{Translator, TranslatorError};
use newssense::application::services::{
    ChunkFailurePolicy, TranslationError, TranslationService, failure_marker,
};
use newssense::domain::SourceLanguage;

/// Upper-cases each chunk and counts calls.
#[derive(Default)]
struct UppercaseTranslator {
    calls: AtomicUsize,
}

#[async_trait]
impl Translator for UppercaseTranslator {
    async fn translate(
        &self,
        chunk: &str,
        _source: SourceLanguage,
    ) -> Result<String, TranslatorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(chunk.to_uppercase())
    }
}

/// Fails every chunk containing the word "broken".
struct SelectiveTranslator;

#[async_trait]
impl Translator for SelectiveTranslator {
    async fn translate(
        &self,
        chunk: &str,
        _source: SourceLanguage,
    ) -> Result<String, TranslatorError> {
        if chunk.contains("broken") {
            return Err(TranslatorError::RequestFailed("backend error".to_string()));
        }
        Ok(format!("<{}>", chunk))
    }
}

struct StallingTranslator;

#[async_trait]
impl Translator for StallingTranslator {
    async fn translate(
        &self,
        _chunk: &str,
        _source: SourceLanguage,
    ) -> Result<String, TranslatorError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(String::new())
    }
}

fn service(translator: Arc<dyn Translator>, policy: ChunkFailurePolicy) -> TranslationService {
    TranslationService::new(translator, policy, Duration::from_secs(5))
}

#[tokio::test]
async fn given_english_text_when_translating_then_translator_is_not_called() {
    let translator = Arc::new(UppercaseTranslator::default());
    let service = service(translator.clone(), ChunkFailurePolicy::MarkAndContinue);

    let translated = service
        .translate("Already English. Nothing to do.", SourceLanguage::English)
        .await
        .unwrap();

    assert_eq!(translated.text, "Already English. Nothing to do.");
    assert_eq!(translated.chunk_count, 0);
    assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_hindi_text_when_translating_then_chunks_are_joined_in_order() {
    let translator = Arc::new(UppercaseTranslator::default());
    let service = service(translator.clone(), ChunkFailurePolicy::MarkAndContinue);

    let translated = service
        .translate("one two. three four! five", SourceLanguage::Hindi)
        .await
        .unwrap();

    assert_eq!(translated.text, "ONE TWO. THREE FOUR! FIVE");
    assert_eq!(translated.chunk_count, 3);
    assert_eq!(translated.failed_chunks, 0);
    assert_eq!(translator.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn given_failing_chunk_with_mark_policy_when_translating_then_inserts_marker() {
    let service = service(Arc::new(SelectiveTranslator), ChunkFailurePolicy::MarkAndContinue);

    let translated = service
        .translate("good start. broken middle. good end.", SourceLanguage::Telugu)
        .await
        .unwrap();

    let marker = failure_marker("translation request failed: backend error");
    assert_eq!(
        translated.text,
        format!("<good start.> {} <good end.>", marker)
    );
    assert_eq!(translated.chunk_count, 3);
    assert_eq!(translated.failed_chunks, 1);
}

#[tokio::test]
async fn given_failing_chunk_with_abort_policy_when_translating_then_returns_chunk_index() {
    let service = service(Arc::new(SelectiveTranslator), ChunkFailurePolicy::Abort);

    let result = service
        .translate("good start. broken middle. good end.", SourceLanguage::Hindi)
        .await;

    assert!(matches!(
        result,
        Err(TranslationError::ChunkFailed {
            index: 1,
            source: TranslatorError::RequestFailed(_)
        })
    ));
}

#[tokio::test]
async fn given_stalled_translator_when_translating_then_chunk_times_out() {
    let service = TranslationService::new(
        Arc::new(StallingTranslator),
        ChunkFailurePolicy::Abort,
        Duration::from_millis(250),
    );

    let result = service.translate("slow chunk.", SourceLanguage::Hindi).await;

    assert!(matches!(
        result,
        Err(TranslationError::ChunkFailed {
            index: 0,
            source: TranslatorError::TimedOut(250)
        })
    ));
}

#[test]
fn given_policy_name_when_deserializing_then_uses_snake_case() {
    let abort: ChunkFailurePolicy = serde_json::from_str("\"abort\"").unwrap();
    let mark: ChunkFailurePolicy = serde_json::from_str("\"mark_and_continue\"").unwrap();

    assert_eq!(abort, ChunkFailurePolicy::Abort);
    assert_eq!(mark, ChunkFailurePolicy::MarkAndContinue);
    assert_eq!(ChunkFailurePolicy::default(), ChunkFailurePolicy::MarkAndContinue);
}
