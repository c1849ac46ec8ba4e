use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::application::ports::{
    CategoryClassifier, EntityExtractor, FakeNewsDetector, ModelInferenceError, ReportExporter,
    ReportExporterError, SentimentAnalyzer, SourceExtractor, SourceExtractorError, Summarizer,
    TopicModel, Translator,
};
use crate::application::services::{
    AnalysisPolicy, TextNormalizer, TranslationError, TranslationService,
};
use crate::domain::{
    AnalysisResult, AnalysisSession, Document, EntitySet, ExportRequest, Facet, FacetOutcome,
    PipelineState, ReportFilename, ReportFilenameError, Sentiment, SessionError, SourceInput,
    SourceLanguage, SourceModality,
};

/// The six inference collaborators of an analysis pass.
#[derive(Clone)]
pub struct InferenceModels {
    pub classifier: Arc<dyn CategoryClassifier>,
    pub summarizer: Arc<dyn Summarizer>,
    pub topic_model: Arc<dyn TopicModel>,
    pub entity_extractor: Arc<dyn EntityExtractor>,
    pub sentiment_analyzer: Arc<dyn SentimentAnalyzer>,
    pub fake_news_detector: Arc<dyn FakeNewsDetector>,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("extraction failed for {modality} source: {source}")]
    Extraction {
        modality: SourceModality,
        #[source]
        source: SourceExtractorError,
    },
    #[error("translation: {0}")]
    Translation(#[from] TranslationError),
    #[error("{facet} inference failed: {source}")]
    ModelInference {
        facet: Facet,
        #[source]
        source: ModelInferenceError,
    },
    #[error("no analysis available: analyze an article before exporting")]
    NoAnalysisAvailable,
    #[error("an analysis pass is already in progress")]
    Busy,
    #[error("export: {0}")]
    Export(#[from] ExportError),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("invalid filename: {0}")]
    InvalidFilename(#[from] ReportFilenameError),
    #[error("{0}")]
    Exporter(#[from] ReportExporterError),
}

impl From<SessionError> for AnalysisError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::PassInFlight => AnalysisError::Busy,
            SessionError::NoAnalysisAvailable | SessionError::StaleResult => {
                AnalysisError::NoAnalysisAvailable
            }
        }
    }
}

/// Drives one article through ingestion, translation, parallel inference and
/// export, keeping the session state machine in step.
pub struct AnalysisOrchestrator {
    extractor: Arc<dyn SourceExtractor>,
    translation: TranslationService,
    normalizer: Arc<TextNormalizer>,
    models: InferenceModels,
    exporter: Arc<dyn ReportExporter>,
    policy: AnalysisPolicy,
}

impl AnalysisOrchestrator {
    pub fn new(
        extractor: Arc<dyn SourceExtractor>,
        translator: Arc<dyn Translator>,
        normalizer: Arc<TextNormalizer>,
        models: InferenceModels,
        exporter: Arc<dyn ReportExporter>,
        policy: AnalysisPolicy,
    ) -> Self {
        let translation = TranslationService::new(
            translator,
            policy.chunk_failure_policy,
            policy.translation_chunk_timeout,
        );
        Self {
            extractor,
            translation,
            normalizer,
            models,
            exporter,
            policy,
        }
    }

    pub fn policy(&self) -> &AnalysisPolicy {
        &self.policy
    }

    #[tracing::instrument(skip(self, input), fields(modality = %input.modality(), bytes = input.size_bytes()))]
    pub async fn ingest(
        &self,
        input: &SourceInput,
        language: SourceLanguage,
    ) -> Result<Document, AnalysisError> {
        let modality = input.modality();
        let timeout = self.policy.extraction_timeout;

        let text = tokio::time::timeout(timeout, self.extractor.extract_text(input))
            .await
            .map_err(|_| SourceExtractorError::TimedOut(timeout.as_millis() as u64))
            .and_then(|result| result)
            .map_err(|source| AnalysisError::Extraction { modality, source })?;

        let text = text.trim();
        if text.is_empty() {
            return Err(AnalysisError::Extraction {
                modality,
                source: SourceExtractorError::NoTextFound(modality.to_string()),
            });
        }

        tracing::info!(chars = text.chars().count(), "Text extracted");
        Ok(Document::new(text.to_string(), modality, language))
    }

    /// Returns an English document. English input passes through untouched.
    #[tracing::instrument(skip(self, document), fields(document_id = %document.id, language = %document.language))]
    pub async fn translate(&self, document: &Document) -> Result<Document, AnalysisError> {
        if !document.needs_translation() {
            return Ok(document.clone());
        }

        let translated = self
            .translation
            .translate(&document.text, document.language)
            .await?;

        if translated.failed_chunks > 0 {
            tracing::warn!(
                failed = translated.failed_chunks,
                total = translated.chunk_count,
                "Document translated with failed chunks"
            );
        }

        Ok(document.with_translation(translated.text))
    }

    /// Runs every facet concurrently over an English document. Optional
    /// facets that fail are reported as unavailable.
    #[tracing::instrument(skip(self, document), fields(document_id = %document.id))]
    pub async fn analyze(&self, document: &Document) -> Result<AnalysisResult, AnalysisError> {
        let normalized = Arc::new(self.normalizer.normalize(&document.text));
        let text: Arc<str> = Arc::from(document.text.as_str());
        let summary_input = self
            .policy
            .summary_input_limit
            .truncate(&document.text)
            .into_owned();
        let fake_news_input = self
            .policy
            .fake_news_input_limit
            .truncate(&document.text)
            .into_owned();
        let entity_input = self
            .policy
            .entity_input_limit
            .truncate(&document.text)
            .into_owned();

        tracing::debug!(tokens = normalized.tokens().count(), "Text normalized");

        let category = {
            let classifier = Arc::clone(&self.models.classifier);
            let normalized = Arc::clone(&normalized);
            self.spawn_facet(Facet::Category, async move {
                classifier.classify(&normalized).await
            })
        };
        let summary = {
            let summarizer = Arc::clone(&self.models.summarizer);
            let length = self.policy.summary_length;
            self.spawn_facet(Facet::Summary, async move {
                summarizer.summarize(&summary_input, length).await
            })
        };
        let topics = {
            let topic_model = Arc::clone(&self.models.topic_model);
            let normalized = Arc::clone(&normalized);
            let top_n = self.policy.topic_count;
            self.spawn_facet(Facet::Topics, async move {
                topic_model.topics(&normalized, top_n).await
            })
        };
        let entities = {
            let extractor = Arc::clone(&self.models.entity_extractor);
            self.spawn_facet(Facet::Entities, async move {
                let found = extractor.extract_entities(&entity_input).await?;
                Ok(found.into_iter().collect::<EntitySet>())
            })
        };
        let sentiment = {
            let analyzer = Arc::clone(&self.models.sentiment_analyzer);
            let text = Arc::clone(&text);
            self.spawn_facet(Facet::Sentiment, async move {
                let polarity = analyzer.polarity(&text).await?;
                Ok(Sentiment::from_polarity(polarity))
            })
        };
        let fake_news = {
            let detector = Arc::clone(&self.models.fake_news_detector);
            self.spawn_facet(Facet::FakeNews, async move {
                detector.detect(&fake_news_input).await
            })
        };

        let (category, summary, topics, entities, sentiment, fake_news) =
            tokio::join!(category, summary, topics, entities, sentiment, fake_news);

        let result = AnalysisResult {
            document_id: document.id,
            category: self.settle(Facet::Category, category)?,
            summary: self.settle(Facet::Summary, summary)?,
            topics: self.settle(Facet::Topics, topics)?,
            entities: self.settle(Facet::Entities, entities)?,
            sentiment: self.settle(Facet::Sentiment, sentiment)?,
            fake_news: self.settle(Facet::FakeNews, fake_news)?,
            completed_at: Utc::now(),
        };

        tracing::info!(
            unavailable = ?result.unavailable_facets(),
            "Analysis aggregated"
        );
        Ok(result)
    }

    /// One full pass: ingest, translate when needed, analyze, aggregate.
    /// Any failure returns the session to `Idle` with no result, and so does
    /// dropping the returned future before it completes.
    pub async fn run_pass(
        &self,
        session: &mut AnalysisSession,
        input: SourceInput,
        language: SourceLanguage,
    ) -> Result<AnalysisResult, AnalysisError> {
        session.begin_pass()?;
        let mut guard = PassGuard::new(session);

        let outcome = self.drive_pass(guard.session(), &input, language).await;
        let session = guard.settle();

        match outcome {
            Ok(result) => {
                session.complete_pass(result.clone())?;
                Ok(result)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Analysis pass failed");
                session.fail_pass(e.to_string());
                Err(e)
            }
        }
    }

    async fn drive_pass(
        &self,
        session: &mut AnalysisSession,
        input: &SourceInput,
        language: SourceLanguage,
    ) -> Result<AnalysisResult, AnalysisError> {
        let document = self.ingest(input, language).await?;
        session.set_document(document.clone());

        let document = if document.needs_translation() {
            session.enter(PipelineState::Translating);
            let translated = self.translate(&document).await?;
            session.set_document(translated.clone());
            translated
        } else {
            document
        };

        session.enter(PipelineState::Analyzing);
        self.analyze(&document).await
    }

    /// Renders the session's current result. The session returns to
    /// `Aggregated` afterwards so a failed export can be retried.
    #[tracing::instrument(skip(self, session))]
    pub async fn export(
        &self,
        session: &mut AnalysisSession,
        filename: &str,
    ) -> Result<PathBuf, AnalysisError> {
        let snapshot = session.begin_export()?;

        let outcome = match ReportFilename::parse(filename, &self.policy.default_report_stem) {
            Ok(filename) => {
                let request = ExportRequest::from_result(&snapshot, filename);
                self.exporter
                    .export(&request)
                    .await
                    .map_err(ExportError::Exporter)
            }
            Err(e) => Err(ExportError::InvalidFilename(e)),
        };

        session.finish_export();

        let path = outcome?;
        tracing::info!(path = %path.display(), "Report exported");
        Ok(path)
    }

    fn spawn_facet<T, F>(
        &self,
        facet: Facet,
        inference: F,
    ) -> JoinHandle<Result<T, ModelInferenceError>>
    where
        T: Send + 'static,
        F: Future<Output = Result<T, ModelInferenceError>> + Send + 'static,
    {
        let timeout = self.policy.inference_timeout;
        tokio::spawn(
            async move {
                tokio::time::timeout(timeout, inference)
                    .await
                    .map_err(|_| ModelInferenceError::TimedOut(timeout.as_millis() as u64))?
            }
            .instrument(tracing::debug_span!("facet", facet = %facet)),
        )
    }

    fn settle<T>(
        &self,
        facet: Facet,
        joined: Result<Result<T, ModelInferenceError>, tokio::task::JoinError>,
    ) -> Result<FacetOutcome<T>, AnalysisError> {
        let outcome = joined.unwrap_or_else(|e| {
            Err(ModelInferenceError::InferenceFailed(format!(
                "inference task aborted: {}",
                e
            )))
        });

        match outcome {
            Ok(value) => Ok(FacetOutcome::Available(value)),
            Err(source) if self.policy.is_required(facet) => {
                tracing::error!(facet = %facet, error = %source, "Required facet failed");
                Err(AnalysisError::ModelInference { facet, source })
            }
            Err(source) => {
                tracing::warn!(facet = %facet, error = %source, "Facet unavailable");
                Ok(FacetOutcome::Unavailable(source.to_string()))
            }
        }
    }
}

pub const PASS_CANCELLED: &str = "analysis pass cancelled";

/// Returns the session to `Idle` if a pass is dropped mid-flight.
struct PassGuard<'a> {
    session: &'a mut AnalysisSession,
    armed: bool,
}

impl<'a> PassGuard<'a> {
    fn new(session: &'a mut AnalysisSession) -> Self {
        Self {
            session,
            armed: true,
        }
    }

    fn session(&mut self) -> &mut AnalysisSession {
        &mut *self.session
    }

    /// Disarms the guard once the pass has an outcome to record.
    fn settle(&mut self) -> &mut AnalysisSession {
        self.armed = false;
        &mut *self.session
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!(state = %self.session.state(), "Analysis pass cancelled");
            self.session.fail_pass(PASS_CANCELLED);
        }
    }
}
