use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{ModelInferenceError, SentimentAnalyzer};
use crate::application::services::InferenceModels;
use crate::presentation::config::ModelSettings;

use super::{
    HfEntityExtractor, HfFakeNewsDetector, HfInferenceClient, HfSummarizer, LdaTopicModel,
    LexiconSentimentAnalyzer, MockCategoryClassifier, MockEntityExtractor, MockFakeNewsDetector,
    MockSentimentAnalyzer, MockSummarizer, MockTopicModel, NerLabelMap, TfidfLinearClassifier,
};

#[derive(Debug, thiserror::Error)]
pub enum ModelFactoryError {
    #[error("failed to load {model}: {source}")]
    LoadFailed {
        model: &'static str,
        #[source]
        source: ModelInferenceError,
    },
}

pub struct ModelFactory;

impl ModelFactory {
    /// Loads every model up front so a missing artifact stops startup
    /// instead of failing the first analysis.
    pub fn create(
        settings: &ModelSettings,
        scaffold_mode: bool,
    ) -> Result<InferenceModels, ModelFactoryError> {
        if scaffold_mode {
            tracing::info!("Scaffold mode: using mock inference models");
            return Ok(Self::mocks());
        }

        let load = |model: &'static str| {
            move |source: ModelInferenceError| ModelFactoryError::LoadFailed { model, source }
        };

        let classifier =
            TfidfLinearClassifier::load(&settings.classifier_path).map_err(load("classifier"))?;
        let topic_model =
            LdaTopicModel::load(&settings.topic_model_path).map_err(load("topic model"))?;
        let sentiment_analyzer: Arc<dyn SentimentAnalyzer> =
            match &settings.sentiment_lexicon_path {
                Some(path) => Arc::new(
                    LexiconSentimentAnalyzer::with_lexicon_file(path)
                        .map_err(load("sentiment lexicon"))?,
                ),
                None => Arc::new(LexiconSentimentAnalyzer::new()),
            };

        let api = &settings.inference;
        let client = Arc::new(
            HfInferenceClient::new(
                &api.base_url,
                api.api_token.clone(),
                Duration::from_secs(api.timeout_secs),
            )
            .map_err(load("inference client"))?,
        );
        tracing::info!(
            base_url = %api.base_url,
            summarization = %api.summarization_model,
            fake_news = %api.fake_news_model,
            ner = %api.ner_model,
            "Hosted inference models configured"
        );

        Ok(InferenceModels {
            classifier: Arc::new(classifier),
            summarizer: Arc::new(HfSummarizer::new(
                Arc::clone(&client),
                &api.summarization_model,
            )),
            topic_model: Arc::new(topic_model),
            entity_extractor: Arc::new(
                HfEntityExtractor::new(Arc::clone(&client), &api.ner_model)
                    .with_label_map(NerLabelMap::new(&api.ner_label_map)),
            ),
            sentiment_analyzer,
            fake_news_detector: Arc::new(HfFakeNewsDetector::new(client, &api.fake_news_model)),
        })
    }

    pub fn mocks() -> InferenceModels {
        InferenceModels {
            classifier: Arc::new(MockCategoryClassifier),
            summarizer: Arc::new(MockSummarizer),
            topic_model: Arc::new(MockTopicModel),
            entity_extractor: Arc::new(MockEntityExtractor),
            sentiment_analyzer: Arc::new(MockSentimentAnalyzer),
            fake_news_detector: Arc::new(MockFakeNewsDetector),
        }
    }
}
