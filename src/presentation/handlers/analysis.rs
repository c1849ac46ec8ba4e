use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::domain::{SourceInput, SourceLanguage};
use crate::infrastructure::observability::preview_for_log;
use crate::presentation::state::AppState;

use super::dto::{AnalysisResponse, ApiError, parse_language};

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Url,
    Youtube,
    Text,
}

#[derive(Debug, Deserialize)]
pub struct SourceRequest {
    pub kind: SourceKind,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub source: SourceRequest,
    #[serde(default)]
    pub language: Option<String>,
}

impl SourceRequest {
    fn into_input(self) -> SourceInput {
        match self.kind {
            SourceKind::Url => SourceInput::Url(self.value),
            SourceKind::Youtube => SourceInput::YouTube(self.value),
            SourceKind::Text => SourceInput::Text(self.value),
        }
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let language = parse_language(request.language.as_deref())?;
    tracing::debug!(
        kind = ?request.source.kind,
        value = %preview_for_log(&request.source.value),
        %language,
        "Analysis requested"
    );

    let response = run_analysis(&state, request.source.into_input(), language).await?;
    Ok((StatusCode::OK, Json(response)))
}

/// Runs one pass against the shared session. A pass already in flight makes
/// the request fail fast with `busy`.
pub(super) async fn run_analysis(
    state: &AppState,
    input: SourceInput,
    language: SourceLanguage,
) -> Result<AnalysisResponse, ApiError> {
    let mut session = state.session.try_lock().map_err(|_| ApiError::busy())?;
    let result = state
        .orchestrator
        .run_pass(&mut session, input, language)
        .await?;
    Ok(AnalysisResponse::new(&result, session.document()))
}

#[tracing::instrument(skip(state))]
pub async fn current_analysis_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .session
        .try_lock()
        .map_err(|_| ApiError::busy_at(state.pipeline_state()))?;
    let result = session
        .result()
        .ok_or_else(|| ApiError::not_found("No analysis available"))?;
    Ok((
        StatusCode::OK,
        Json(AnalysisResponse::new(result, session.document())),
    ))
}
