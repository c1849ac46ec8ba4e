use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::presentation::state::AppState;

use super::dto::{ApiError, DocumentView};

#[derive(Serialize, Deserialize)]
pub struct SessionResponse {
    pub state: String,
    pub document: Option<DocumentView>,
    pub has_result: bool,
    pub last_error: Option<String>,
    pub busy: bool,
}

/// While a pass holds the session only its current stage is reported.
pub async fn session_handler(State(state): State<AppState>) -> Json<SessionResponse> {
    let Ok(session) = state.session.try_lock() else {
        return Json(SessionResponse {
            state: state.pipeline_state().as_str().to_string(),
            document: None,
            has_result: false,
            last_error: None,
            busy: true,
        });
    };
    Json(SessionResponse {
        state: session.state().as_str().to_string(),
        document: session.document().map(DocumentView::new),
        has_result: session.result().is_some(),
        last_error: session.last_error().map(str::to_string),
        busy: false,
    })
}

/// Drops the current document and result. Notes are kept.
pub async fn reset_session_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let mut session = state.session.try_lock().map_err(|_| ApiError::busy())?;
    session.reset();
    tracing::info!("Session reset");
    Ok(StatusCode::NO_CONTENT)
}
