use std::process::Stdio;

use async_trait::async_trait;
use image::ImageFormat;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::{SourceExtractor, SourceExtractorError};
use crate::domain::SourceInput;

use super::text_sanitizer::sanitize_extracted_text;

/// OCR through the `tesseract` command line tool, image on stdin and text on
/// stdout. Only PNG and JPEG uploads are accepted.
pub struct TesseractOcrAdapter {
    command: String,
    language: String,
}

impl TesseractOcrAdapter {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }

    fn check_format(data: &[u8]) -> Result<ImageFormat, SourceExtractorError> {
        let format = image::guess_format(data).map_err(|_| {
            SourceExtractorError::InvalidInput("upload is not a recognizable image".to_string())
        })?;
        match format {
            ImageFormat::Png | ImageFormat::Jpeg => Ok(format),
            other => Err(SourceExtractorError::InvalidInput(format!(
                "unsupported image format: {other:?}"
            ))),
        }
    }

    async fn run_tesseract(&self, data: &[u8]) -> Result<String, SourceExtractorError> {
        let mut child = Command::new(&self.command)
            .args(["stdin", "stdout", "-l", &self.language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                SourceExtractorError::ExtractionFailed(format!(
                    "failed to start '{}': {e}",
                    self.command
                ))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(data).await.map_err(|e| {
                SourceExtractorError::ExtractionFailed(format!("failed to send image: {e}"))
            })?;
        }

        let output = child.wait_with_output().await.map_err(|e| {
            SourceExtractorError::ExtractionFailed(format!("tesseract did not finish: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SourceExtractorError::ExtractionFailed(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl SourceExtractor for TesseractOcrAdapter {
    #[tracing::instrument(skip(self, input), fields(bytes = input.size_bytes()))]
    async fn extract_text(&self, input: &SourceInput) -> Result<String, SourceExtractorError> {
        let SourceInput::Image(data) = input else {
            return Err(SourceExtractorError::UnsupportedSource(input.modality()));
        };

        let format = Self::check_format(data)?;
        tracing::debug!(?format, "Running OCR");

        let raw = self.run_tesseract(data).await?;
        let text = sanitize_extracted_text(&raw);

        if text.is_empty() {
            return Err(SourceExtractorError::NoTextFound("image".to_string()));
        }
        Ok(text)
    }
}
