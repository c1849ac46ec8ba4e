use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::presentation::state::AppState;

use super::dto::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct ExportBody {
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ExportResponse {
    pub path: String,
    pub filename: String,
}

#[tracing::instrument(skip(state, body))]
pub async fn export_handler(
    State(state): State<AppState>,
    Json(body): Json<ExportBody>,
) -> Result<impl IntoResponse, ApiError> {
    let mut session = state.session.try_lock().map_err(|_| ApiError::busy())?;
    let filename = body.filename.unwrap_or_default();

    let path = state.orchestrator.export(&mut session, &filename).await?;

    let response = ExportResponse {
        filename: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        path: path.display().to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}
