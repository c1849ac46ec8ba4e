mod artifacts;
mod hf_entity_extractor;
mod hf_fake_news_detector;
mod hf_inference_client;
mod hf_summarizer;
mod lda_topic_model;
mod lexicon_sentiment;
mod mock_models;
mod model_factory;
mod tfidf_classifier;

pub use artifacts::load_json_artifact;
pub use hf_entity_extractor::{
    DEFAULT_NER_MODEL, HfEntityExtractor, NerLabelMap, NerSpan, entities_from_spans,
};
pub use hf_fake_news_detector::{
    DEFAULT_FAKE_NEWS_MODEL, HfFakeNewsDetector, LabelScore, verdict_from_scores,
};
pub use hf_inference_client::HfInferenceClient;
pub use hf_summarizer::{DEFAULT_SUMMARIZATION_MODEL, HfSummarizer};
pub use lda_topic_model::{LdaArtifact, LdaTopicModel};
pub use lexicon_sentiment::LexiconSentimentAnalyzer;
pub use mock_models::{
    MockCategoryClassifier, MockEntityExtractor, MockFakeNewsDetector, MockSentimentAnalyzer,
    MockSummarizer, MockTopicModel,
};
pub use model_factory::{ModelFactory, ModelFactoryError};
pub use tfidf_classifier::{TfidfClassifierArtifact, TfidfLinearClassifier};
