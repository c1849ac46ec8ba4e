use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::domain::SourceInput;
use crate::presentation::state::AppState;

use super::analysis::run_analysis;
use super::dto::{ApiError, parse_language};

/// Decides between PDF and image from the declared type, falling back to the
/// leading bytes when the client sent none.
fn classify_upload(data: Vec<u8>, content_type: Option<&str>) -> Result<SourceInput, ApiError> {
    match content_type.map(str::to_lowercase).as_deref() {
        Some("application/pdf") => Ok(SourceInput::Pdf(data)),
        Some(ct) if ct.starts_with("image/") => Ok(SourceInput::Image(data)),
        _ if data.starts_with(b"%PDF") => Ok(SourceInput::Pdf(data)),
        _ if image::guess_format(&data).is_ok() => Ok(SourceInput::Image(data)),
        other => Err(ApiError::unsupported_media(format!(
            "Unsupported upload type: {}",
            other.unwrap_or("unknown")
        ))),
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut upload: Option<(Vec<u8>, Option<String>)> = None;
    let mut language: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read multipart: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {}", e)))?;
                upload = Some((data.to_vec(), content_type));
            }
            Some("language") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read language: {}", e)))?;
                language = Some(value);
            }
            _ => {}
        }
    }

    let (data, content_type) = upload.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;
    if data.is_empty() {
        return Err(ApiError::bad_request("Uploaded file is empty"));
    }
    tracing::debug!(bytes = data.len(), content_type = ?content_type, "File data received");

    let language = parse_language(language.as_deref())?;
    let input = classify_upload(data, content_type.as_deref())?;

    let response = run_analysis(&state, input, language).await?;
    Ok((StatusCode::OK, Json(response)))
}
