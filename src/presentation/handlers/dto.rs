use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::{ModelInferenceError, SourceExtractorError};
use crate::application::services::{AnalysisError, ExportError};
use crate::domain::{AnalysisResult, Document, PipelineState, SourceLanguage};

pub const PREVIEW_CHARS: usize = 1000;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

/// Error surfaced to HTTP clients with a stable `kind` discriminator.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "bad_request",
            message: message.into(),
        }
    }

    pub fn unsupported_media(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            kind: "unsupported_media_type",
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            kind: "not_found",
            message: message.into(),
        }
    }

    pub fn busy() -> Self {
        AnalysisError::Busy.into()
    }

    /// `busy`, naming the stage the running pass has reached.
    pub fn busy_at(state: PipelineState) -> Self {
        Self {
            message: format!("an analysis pass is in progress ({state})"),
            ..Self::busy()
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(error: AnalysisError) -> Self {
        let (status, kind) = match &error {
            AnalysisError::Extraction { source, .. } => match source {
                SourceExtractorError::UnsupportedSource(_) => {
                    (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_source")
                }
                SourceExtractorError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
                SourceExtractorError::FetchFailed(_) => (StatusCode::BAD_GATEWAY, "fetch_failed"),
                SourceExtractorError::TimedOut(_) => (StatusCode::GATEWAY_TIMEOUT, "timed_out"),
                SourceExtractorError::ExtractionFailed(_) | SourceExtractorError::NoTextFound(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "extraction_failed")
                }
            },
            AnalysisError::Translation(_) => (StatusCode::BAD_GATEWAY, "translation_failed"),
            AnalysisError::ModelInference { source, .. } => match source {
                ModelInferenceError::TimedOut(_) => (StatusCode::GATEWAY_TIMEOUT, "timed_out"),
                _ => (StatusCode::BAD_GATEWAY, "model_inference_failed"),
            },
            AnalysisError::NoAnalysisAvailable => (StatusCode::CONFLICT, "no_analysis_available"),
            AnalysisError::Busy => (StatusCode::CONFLICT, "busy"),
            AnalysisError::Export(ExportError::InvalidFilename(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_filename")
            }
            AnalysisError::Export(ExportError::Exporter(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "export_failed")
            }
        };
        Self {
            status,
            kind,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, kind = self.kind, error = %self.message, "Request failed");
        } else {
            tracing::warn!(status = %self.status, kind = self.kind, error = %self.message, "Request rejected");
        }
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
                kind: self.kind.to_string(),
            }),
        )
            .into_response()
    }
}

pub fn parse_language(raw: Option<&str>) -> Result<SourceLanguage, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => value.parse().map_err(ApiError::bad_request),
        None => Ok(SourceLanguage::default()),
    }
}

#[derive(Serialize, Deserialize)]
pub struct DocumentView {
    pub id: String,
    pub modality: String,
    pub language: String,
    pub translated: bool,
    pub chars: usize,
    pub preview: String,
}

impl DocumentView {
    pub fn new(document: &Document) -> Self {
        Self {
            id: document.id.to_string(),
            modality: document.modality.as_str().to_string(),
            language: document.language.as_str().to_string(),
            translated: document.translated,
            chars: document.text.chars().count(),
            preview: document.preview(PREVIEW_CHARS).to_string(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct TopicView {
    pub id: u32,
    pub probability: f32,
    pub keywords: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct EntityView {
    pub text: String,
    pub label: String,
}

#[derive(Serialize, Deserialize)]
pub struct EntityGroupView {
    pub label: String,
    pub count: usize,
    pub texts: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct FakeNewsView {
    pub label: String,
    pub confidence: f32,
}

/// Flattened analysis result. Facets that could not be computed are `null`
/// and listed with their reason under `unavailable`.
#[derive(Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub document_id: String,
    pub document: Option<DocumentView>,
    pub category: Option<String>,
    pub summary: Option<String>,
    pub keywords: Vec<String>,
    pub topics: Option<Vec<TopicView>>,
    pub entities: Option<Vec<EntityView>>,
    pub entity_groups: Option<Vec<EntityGroupView>>,
    pub sentiment: Option<String>,
    pub fake_news: Option<FakeNewsView>,
    pub unavailable: BTreeMap<String, String>,
    pub completed_at: String,
}

impl AnalysisResponse {
    pub fn new(result: &AnalysisResult, document: Option<&Document>) -> Self {
        let mut unavailable = BTreeMap::new();
        let mut note = |facet: &str, reason: Option<&str>| {
            if let Some(reason) = reason {
                unavailable.insert(facet.to_string(), reason.to_string());
            }
        };
        note("category", result.category.unavailable_reason());
        note("summary", result.summary.unavailable_reason());
        note("topics", result.topics.unavailable_reason());
        note("entities", result.entities.unavailable_reason());
        note("sentiment", result.sentiment.unavailable_reason());
        note("fake_news", result.fake_news.unavailable_reason());

        Self {
            document_id: result.document_id.to_string(),
            document: document.map(DocumentView::new),
            category: result.category.as_available().cloned(),
            summary: result.summary.as_available().cloned(),
            keywords: result.keywords(),
            topics: result.topics.as_available().map(|topics| {
                topics
                    .iter()
                    .map(|t| TopicView {
                        id: t.id,
                        probability: t.probability,
                        keywords: t.words().map(str::to_string).collect(),
                    })
                    .collect()
            }),
            entities: result.entities.as_available().map(|set| {
                set.iter()
                    .map(|e| EntityView {
                        text: e.text.clone(),
                        label: e.label.clone(),
                    })
                    .collect()
            }),
            entity_groups: result.entities.as_available().map(|set| {
                set.grouped_by_label()
                    .into_iter()
                    .map(|(label, texts)| EntityGroupView {
                        label: label.to_string(),
                        count: texts.len(),
                        texts: texts.into_iter().map(str::to_string).collect(),
                    })
                    .collect()
            }),
            sentiment: result.sentiment.as_available().map(|s| s.as_str().to_string()),
            fake_news: result.fake_news.as_available().map(|v| FakeNewsView {
                label: v.label.as_str().to_string(),
                confidence: v.confidence,
            }),
            unavailable,
            completed_at: result.completed_at.to_rfc3339(),
        }
    }
}
