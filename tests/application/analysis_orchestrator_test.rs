use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use newssense::application::ports::{
    CategoryClassifier, EntityExtractor, ModelInferenceError, ReportExporter,
    ReportExporterError, SentimentAnalyzer, SourceExtractor, SourceExtractorError, Summarizer,
    SummaryLength,
};
use newssense::application::services::{
    AnalysisError, AnalysisOrchestrator, AnalysisPolicy, ExportError, InferenceModels,
    InputLimit, PASS_CANCELLED, TextNormalizer, count_tokens,
};
use newssense::domain::{
    AnalysisSession, Entity, ExportRequest, Facet, FacetOutcome, NormalizedText, PipelineState,
    Sentiment, SourceInput, SourceLanguage,
};
use newssense::infrastructure::extraction::{MOCK_ARTICLE, MockSourceExtractor};
use newssense::infrastructure::models::{
    LexiconSentimentAnalyzer, ModelFactory, NerLabelMap, NerSpan, TfidfClassifierArtifact,
    TfidfLinearClassifier, entities_from_spans,
};
use newssense::infrastructure::translation::MockTranslator;

const ARTICLE: &str = "The central bank held rates steady. Officials in Mumbai welcomed the decision.";

#[derive(Default)]
struct RecordingExporter {
    requests: Mutex<Vec<ExportRequest>>,
}

#[async_trait]
impl ReportExporter for RecordingExporter {
    async fn export(&self, request: &ExportRequest) -> Result<PathBuf, ReportExporterError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(PathBuf::from("/reports").join(request.filename.as_str()))
    }
}

struct FailingExporter;

#[async_trait]
impl ReportExporter for FailingExporter {
    async fn export(&self, _request: &ExportRequest) -> Result<PathBuf, ReportExporterError> {
        Err(ReportExporterError::RenderFailed("disk full".to_string()))
    }
}

struct BlankExtractor;

#[async_trait]
impl SourceExtractor for BlankExtractor {
    async fn extract_text(&self, _input: &SourceInput) -> Result<String, SourceExtractorError> {
        Ok("   \n ".to_string())
    }
}

struct BrokenSummarizer;

#[async_trait]
impl Summarizer for BrokenSummarizer {
    async fn summarize(
        &self,
        _text: &str,
        _length: SummaryLength,
    ) -> Result<String, ModelInferenceError> {
        Err(ModelInferenceError::ApiRequestFailed("HTTP 500".to_string()))
    }
}

struct BrokenSentiment;

#[async_trait]
impl SentimentAnalyzer for BrokenSentiment {
    async fn polarity(&self, _text: &str) -> Result<f64, ModelInferenceError> {
        Err(ModelInferenceError::InferenceFailed("lexicon missing".to_string()))
    }
}

struct PositiveSentiment;

#[async_trait]
impl SentimentAnalyzer for PositiveSentiment {
    async fn polarity(&self, _text: &str) -> Result<f64, ModelInferenceError> {
        Ok(0.4)
    }
}

struct StallingClassifier;

#[async_trait]
impl CategoryClassifier for StallingClassifier {
    async fn classify(&self, _text: &NormalizedText) -> Result<String, ModelInferenceError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok("never".to_string())
    }
}

struct DuplicatingEntities;

#[async_trait]
impl EntityExtractor for DuplicatingEntities {
    async fn extract_entities(&self, _text: &str) -> Result<Vec<Entity>, ModelInferenceError> {
        Ok(vec![
            Entity::new("Mumbai", "GPE"),
            Entity::new("Mumbai", "GPE"),
            Entity::new(" Mumbai ", "GPE"),
            Entity::new("Reserve Bank", "ORG"),
        ])
    }
}

struct StallingExtractor;

#[async_trait]
impl SourceExtractor for StallingExtractor {
    async fn extract_text(&self, _input: &SourceInput) -> Result<String, SourceExtractorError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(ARTICLE.to_string())
    }
}

#[derive(Default)]
struct RecordingEntities {
    inputs: Mutex<Vec<String>>,
}

#[async_trait]
impl EntityExtractor for RecordingEntities {
    async fn extract_entities(&self, text: &str) -> Result<Vec<Entity>, ModelInferenceError> {
        self.inputs.lock().unwrap().push(text.to_string());
        Ok(vec![Entity::new("Mumbai", "GPE")])
    }
}

/// Replays the aggregated spans `dslim/bert-base-NER` returns for the Apple
/// headline.
struct ConllNerExtractor;

#[async_trait]
impl EntityExtractor for ConllNerExtractor {
    async fn extract_entities(&self, _text: &str) -> Result<Vec<Entity>, ModelInferenceError> {
        let span = |group: &str, word: &str| NerSpan {
            entity_group: Some(group.to_string()),
            entity: None,
            word: word.to_string(),
        };
        Ok(entities_from_spans(
            vec![span("ORG", "Apple Inc."), span("LOC", "New York")],
            &NerLabelMap::default(),
        ))
    }
}

fn news_classifier() -> TfidfLinearClassifier {
    let vocabulary = ["apple", "profit", "record", "election", "vote"]
        .iter()
        .enumerate()
        .map(|(index, term)| (term.to_string(), index))
        .collect();
    TfidfLinearClassifier::from_artifact(TfidfClassifierArtifact {
        vocabulary,
        idf: vec![1.0; 5],
        ngram_range: (1, 1),
        sublinear_tf: false,
        classes: vec!["politics".to_string(), "business".to_string()],
        coef: vec![
            vec![0.0, 0.0, 0.0, 1.5, 1.5],
            vec![1.2, 1.5, 0.8, 0.0, 0.0],
        ],
        intercept: vec![0.1, 0.0],
    })
    .unwrap()
}

fn orchestrator_with(
    extractor: Arc<dyn SourceExtractor>,
    models: InferenceModels,
    exporter: Arc<dyn ReportExporter>,
    policy: AnalysisPolicy,
) -> AnalysisOrchestrator {
    AnalysisOrchestrator::new(
        extractor,
        Arc::new(MockTranslator::new()),
        Arc::new(TextNormalizer::with_stopwords(&["the", "in", "of"])),
        models,
        exporter,
        policy,
    )
}

fn orchestrator(models: InferenceModels) -> AnalysisOrchestrator {
    orchestrator_with(
        Arc::new(MockSourceExtractor),
        models,
        Arc::new(RecordingExporter::default()),
        AnalysisPolicy::default(),
    )
}

fn text(article: &str) -> SourceInput {
    SourceInput::Text(article.to_string())
}

#[tokio::test]
async fn given_english_text_when_running_pass_then_session_is_aggregated() {
    let orchestrator = orchestrator(ModelFactory::mocks());
    let mut session = AnalysisSession::new();

    let result = orchestrator
        .run_pass(&mut session, text(ARTICLE), SourceLanguage::English)
        .await
        .unwrap();

    assert_eq!(session.state(), PipelineState::Aggregated);
    assert_eq!(session.result(), Some(&result));
    assert!(result.is_complete());
    assert_eq!(result.category, FacetOutcome::Available("business".to_string()));
    assert_eq!(
        result.summary,
        FacetOutcome::Available("The central bank held rates steady.".to_string())
    );

    let document = session.document().unwrap();
    assert_eq!(document.id, result.document_id);
    assert!(!document.translated);
}

#[tokio::test]
async fn given_hindi_input_when_running_pass_then_document_is_translated() {
    let orchestrator = orchestrator(ModelFactory::mocks());
    let mut session = AnalysisSession::new();

    orchestrator
        .run_pass(&mut session, text("बाजार ऊपर गए। निवेशक खुश हैं।"), SourceLanguage::Hindi)
        .await
        .unwrap();

    let document = session.document().unwrap();
    assert!(document.translated);
    assert_eq!(document.language, SourceLanguage::Hindi);
    assert_eq!(session.state(), PipelineState::Aggregated);
}

#[tokio::test]
async fn given_non_text_input_when_ingesting_then_uses_extractor_output() {
    let orchestrator = orchestrator(ModelFactory::mocks());

    let document = orchestrator
        .ingest(
            &SourceInput::Url("https://news.example.com/story".to_string()),
            SourceLanguage::English,
        )
        .await
        .unwrap();

    assert_eq!(document.text, MOCK_ARTICLE);
}

#[tokio::test]
async fn given_optional_facet_failure_when_analyzing_then_facet_is_unavailable() {
    let mut models = ModelFactory::mocks();
    models.sentiment_analyzer = Arc::new(BrokenSentiment);
    let orchestrator = orchestrator(models);
    let mut session = AnalysisSession::new();

    let result = orchestrator
        .run_pass(&mut session, text(ARTICLE), SourceLanguage::English)
        .await
        .unwrap();

    assert_eq!(result.unavailable_facets(), vec![Facet::Sentiment]);
    assert!(
        result
            .sentiment
            .unavailable_reason()
            .unwrap()
            .contains("lexicon missing")
    );
    assert!(result.category.is_available());
}

#[tokio::test]
async fn given_required_facet_failure_when_running_pass_then_session_returns_to_idle() {
    let mut models = ModelFactory::mocks();
    models.summarizer = Arc::new(BrokenSummarizer);
    let orchestrator = orchestrator(models);
    let mut session = AnalysisSession::new();

    let outcome = orchestrator
        .run_pass(&mut session, text(ARTICLE), SourceLanguage::English)
        .await;

    assert!(matches!(
        outcome,
        Err(AnalysisError::ModelInference {
            facet: Facet::Summary,
            source: ModelInferenceError::ApiRequestFailed(_)
        })
    ));
    assert_eq!(session.state(), PipelineState::Idle);
    assert!(session.result().is_none());
    assert!(session.last_error().is_some());
}

#[tokio::test]
async fn given_stalled_required_model_when_analyzing_then_times_out() {
    let mut models = ModelFactory::mocks();
    models.classifier = Arc::new(StallingClassifier);
    let policy = AnalysisPolicy {
        inference_timeout: Duration::from_millis(200),
        ..AnalysisPolicy::default()
    };
    let orchestrator = orchestrator_with(
        Arc::new(MockSourceExtractor),
        models,
        Arc::new(RecordingExporter::default()),
        policy,
    );
    let mut session = AnalysisSession::new();

    let outcome = orchestrator
        .run_pass(&mut session, text(ARTICLE), SourceLanguage::English)
        .await;

    assert!(matches!(
        outcome,
        Err(AnalysisError::ModelInference {
            facet: Facet::Category,
            source: ModelInferenceError::TimedOut(200)
        })
    ));
}

#[tokio::test]
async fn given_stalled_optional_model_when_category_not_required_then_marks_unavailable() {
    let mut models = ModelFactory::mocks();
    models.classifier = Arc::new(StallingClassifier);
    let policy = AnalysisPolicy {
        inference_timeout: Duration::from_millis(200),
        required_facets: [Facet::Summary].into_iter().collect(),
        ..AnalysisPolicy::default()
    };
    let orchestrator = orchestrator_with(
        Arc::new(MockSourceExtractor),
        models,
        Arc::new(RecordingExporter::default()),
        policy,
    );
    let mut session = AnalysisSession::new();

    let result = orchestrator
        .run_pass(&mut session, text(ARTICLE), SourceLanguage::English)
        .await
        .unwrap();

    assert_eq!(result.unavailable_facets(), vec![Facet::Category]);
}

#[tokio::test]
async fn given_duplicate_entities_when_analyzing_then_aggregate_is_deduplicated() {
    let mut models = ModelFactory::mocks();
    models.entity_extractor = Arc::new(DuplicatingEntities);
    models.sentiment_analyzer = Arc::new(PositiveSentiment);
    let orchestrator = orchestrator(models);
    let mut session = AnalysisSession::new();

    let result = orchestrator
        .run_pass(&mut session, text(ARTICLE), SourceLanguage::English)
        .await
        .unwrap();

    let entities = result.entities.as_available().unwrap();
    assert_eq!(entities.len(), 2);
    assert!(entities.contains("Mumbai", "GPE"));
    assert_eq!(result.sentiment, FacetOutcome::Available(Sentiment::Positive));
}

#[tokio::test]
async fn given_blank_extraction_when_running_pass_then_fails_with_no_text() {
    let orchestrator = orchestrator_with(
        Arc::new(BlankExtractor),
        ModelFactory::mocks(),
        Arc::new(RecordingExporter::default()),
        AnalysisPolicy::default(),
    );
    let mut session = AnalysisSession::new();

    let outcome = orchestrator
        .run_pass(&mut session, text("ignored"), SourceLanguage::English)
        .await;

    assert!(matches!(
        outcome,
        Err(AnalysisError::Extraction {
            source: SourceExtractorError::NoTextFound(_),
            ..
        })
    ));
    assert_eq!(session.state(), PipelineState::Idle);
}

#[tokio::test]
async fn given_failed_second_pass_when_querying_then_first_result_is_discarded() {
    let mut models = ModelFactory::mocks();
    let orchestrator = orchestrator(models.clone());
    let mut session = AnalysisSession::new();
    orchestrator
        .run_pass(&mut session, text(ARTICLE), SourceLanguage::English)
        .await
        .unwrap();

    models.summarizer = Arc::new(BrokenSummarizer);
    let failing = orchestrator_with(
        Arc::new(MockSourceExtractor),
        models,
        Arc::new(RecordingExporter::default()),
        AnalysisPolicy::default(),
    );
    let outcome = failing
        .run_pass(&mut session, text(ARTICLE), SourceLanguage::English)
        .await;

    assert!(outcome.is_err());
    assert!(session.result().is_none());
    assert!(session.document().is_some());
}

#[tokio::test]
async fn given_pass_in_flight_when_running_another_then_busy() {
    let orchestrator = orchestrator(ModelFactory::mocks());
    let mut session = AnalysisSession::new();
    session.begin_pass().unwrap();

    let outcome = orchestrator
        .run_pass(&mut session, text(ARTICLE), SourceLanguage::English)
        .await;

    assert!(matches!(outcome, Err(AnalysisError::Busy)));
}

#[tokio::test]
async fn given_no_analysis_when_exporting_then_no_analysis_available() {
    let orchestrator = orchestrator(ModelFactory::mocks());
    let mut session = AnalysisSession::new();

    let outcome = orchestrator.export(&mut session, "report").await;

    assert!(matches!(outcome, Err(AnalysisError::NoAnalysisAvailable)));
}

#[tokio::test]
async fn given_aggregated_session_when_exporting_then_writes_default_filename() {
    let exporter = Arc::new(RecordingExporter::default());
    let orchestrator = orchestrator_with(
        Arc::new(MockSourceExtractor),
        ModelFactory::mocks(),
        exporter.clone(),
        AnalysisPolicy::default(),
    );
    let mut session = AnalysisSession::new();
    orchestrator
        .run_pass(&mut session, text(ARTICLE), SourceLanguage::English)
        .await
        .unwrap();

    let path = orchestrator.export(&mut session, "").await.unwrap();

    assert_eq!(path, PathBuf::from("/reports/news_summary.pdf"));
    assert_eq!(session.state(), PipelineState::Aggregated);
    let requests = exporter.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].category, "business");
}

#[tokio::test]
async fn given_path_like_filename_when_exporting_then_rejects_and_stays_aggregated() {
    let orchestrator = orchestrator(ModelFactory::mocks());
    let mut session = AnalysisSession::new();
    orchestrator
        .run_pass(&mut session, text(ARTICLE), SourceLanguage::English)
        .await
        .unwrap();

    let outcome = orchestrator.export(&mut session, "../escape").await;

    assert!(matches!(
        outcome,
        Err(AnalysisError::Export(ExportError::InvalidFilename(_)))
    ));
    assert_eq!(session.state(), PipelineState::Aggregated);
    assert!(session.result().is_some());
}

#[tokio::test]
async fn given_failing_exporter_when_exporting_then_export_can_be_retried() {
    let orchestrator = orchestrator_with(
        Arc::new(MockSourceExtractor),
        ModelFactory::mocks(),
        Arc::new(FailingExporter),
        AnalysisPolicy::default(),
    );
    let mut session = AnalysisSession::new();
    orchestrator
        .run_pass(&mut session, text(ARTICLE), SourceLanguage::English)
        .await
        .unwrap();

    let first = orchestrator.export(&mut session, "report").await;
    let second = orchestrator.export(&mut session, "report").await;

    assert!(matches!(
        first,
        Err(AnalysisError::Export(ExportError::Exporter(_)))
    ));
    assert!(matches!(
        second,
        Err(AnalysisError::Export(ExportError::Exporter(_)))
    ));
    assert_eq!(session.state(), PipelineState::Aggregated);
}

#[tokio::test]
async fn given_pass_dropped_mid_flight_when_running_again_then_session_recovers() {
    let stalled = orchestrator_with(
        Arc::new(StallingExtractor),
        ModelFactory::mocks(),
        Arc::new(RecordingExporter::default()),
        AnalysisPolicy::default(),
    );
    let mut session = AnalysisSession::new();

    let abandoned = tokio::time::timeout(
        Duration::from_millis(50),
        stalled.run_pass(&mut session, text(ARTICLE), SourceLanguage::English),
    )
    .await;

    assert!(abandoned.is_err());
    assert_eq!(session.state(), PipelineState::Idle);
    assert_eq!(session.last_error(), Some(PASS_CANCELLED));

    let result = orchestrator(ModelFactory::mocks())
        .run_pass(&mut session, text(ARTICLE), SourceLanguage::English)
        .await
        .unwrap();

    assert_eq!(session.state(), PipelineState::Aggregated);
    assert_eq!(session.result(), Some(&result));
}

#[tokio::test]
async fn given_long_article_when_analyzing_then_entity_extractor_sees_capped_input() {
    let recorder = Arc::new(RecordingEntities::default());
    let mut models = ModelFactory::mocks();
    models.entity_extractor = Arc::clone(&recorder) as Arc<dyn EntityExtractor>;
    let policy = AnalysisPolicy {
        entity_input_limit: InputLimit::Tokens(40),
        ..AnalysisPolicy::default()
    };
    let orchestrator = orchestrator_with(
        Arc::new(MockSourceExtractor),
        models,
        Arc::new(RecordingExporter::default()),
        policy,
    );
    let article = vec![ARTICLE; 30].join(" ");
    let mut session = AnalysisSession::new();

    orchestrator
        .run_pass(&mut session, text(&article), SourceLanguage::English)
        .await
        .unwrap();

    let inputs = recorder.inputs.lock().unwrap();
    assert_eq!(inputs.len(), 1);
    assert!(count_tokens(&inputs[0]) <= 40);
    assert!(article.starts_with(inputs[0].as_str()));
    assert!(inputs[0].len() < article.len());
}

#[tokio::test]
async fn given_apple_headline_when_analyzing_then_business_entities_and_non_negative_tone() {
    let mut models = ModelFactory::mocks();
    models.classifier = Arc::new(news_classifier());
    models.entity_extractor = Arc::new(ConllNerExtractor);
    models.sentiment_analyzer = Arc::new(LexiconSentimentAnalyzer::new());
    let orchestrator = orchestrator(models);
    let mut session = AnalysisSession::new();

    let result = orchestrator
        .run_pass(
            &mut session,
            text("Apple Inc. announced record profits today in New York."),
            SourceLanguage::English,
        )
        .await
        .unwrap();

    assert_eq!(result.category, FacetOutcome::Available("business".to_string()));
    let entities = result.entities.as_available().unwrap();
    assert!(entities.contains("Apple Inc.", "ORG"));
    assert!(entities.contains("New York", "GPE"));
    assert!(matches!(
        result.sentiment,
        FacetOutcome::Available(Sentiment::Positive | Sentiment::Neutral)
    ));
}
