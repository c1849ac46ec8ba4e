use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::domain::NOTES_FILENAME;
use crate::presentation::state::AppState;

use super::dto::ApiError;

#[derive(Serialize, Deserialize)]
pub struct NotesBody {
    pub text: String,
}

pub async fn get_notes_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.session.try_lock().map_err(|_| ApiError::busy())?;
    Ok(Json(NotesBody {
        text: session.notes().as_str().to_string(),
    }))
}

pub async fn put_notes_handler(
    State(state): State<AppState>,
    Json(body): Json<NotesBody>,
) -> Result<impl IntoResponse, ApiError> {
    let mut session = state.session.try_lock().map_err(|_| ApiError::busy())?;
    session.notes_mut().set(body.text);
    tracing::debug!(chars = session.notes().as_str().chars().count(), "Notes updated");
    Ok(Json(NotesBody {
        text: session.notes().as_str().to_string(),
    }))
}

pub async fn download_notes_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.session.try_lock().map_err(|_| ApiError::busy())?;
    if session.notes().is_blank() {
        return Err(ApiError::not_found("No notes to download"));
    }

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", NOTES_FILENAME),
            ),
        ],
        session.notes().as_str().to_string(),
    ))
}
