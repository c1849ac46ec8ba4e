mod category_classifier;
mod entity_extractor;
mod fake_news_detector;
mod model_inference_error;
mod report_exporter;
mod sentiment_analyzer;
mod source_extractor;
mod summarizer;
mod topic_model;
mod translator;

pub use category_classifier::CategoryClassifier;
pub use entity_extractor::EntityExtractor;
pub use fake_news_detector::FakeNewsDetector;
pub use model_inference_error::ModelInferenceError;
pub use report_exporter::{ReportExporter, ReportExporterError};
pub use sentiment_analyzer::SentimentAnalyzer;
pub use source_extractor::{SourceExtractor, SourceExtractorError};
pub use summarizer::{Summarizer, SummaryLength};
pub use topic_model::TopicModel;
pub use translator::{Translator, TranslatorError};
