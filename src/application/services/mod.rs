mod analysis_orchestrator;
mod analysis_policy;
mod input_limit;
mod sentence_chunker;
mod text_normalizer;
mod translation_service;

pub use analysis_orchestrator::{
    AnalysisError, AnalysisOrchestrator, ExportError, InferenceModels, PASS_CANCELLED,
};
pub use analysis_policy::{
    AnalysisPolicy, DEFAULT_ENTITY_MAX_INPUT_TOKENS, DEFAULT_REPORT_STEM,
    DEFAULT_SUMMARY_MAX_INPUT_TOKENS,
};
pub use input_limit::{InputLimit, count_tokens};
pub use sentence_chunker::split_sentences;
pub use text_normalizer::{TextNormalizer, lemmatize};
pub use translation_service::{
    ChunkFailurePolicy, TranslatedText, TranslationError, TranslationService, failure_marker,
};
