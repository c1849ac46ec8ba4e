use std::time::Duration;

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Client;

use crate::application::ports::{SourceExtractor, SourceExtractorError};
use crate::domain::{SourceInput, VideoId};

use super::html_text::decode_entities;
use super::text_sanitizer::sanitize_inline;

pub const DEFAULT_TIMEDTEXT_BASE_URL: &str = "https://video.google.com";

/// Fetches the caption track of a YouTube video and flattens it into one
/// space-joined string.
pub struct YouTubeTranscriptAdapter {
    client: Client,
    base_url: String,
    caption_language: String,
}

impl YouTubeTranscriptAdapter {
    pub fn new(
        base_url: &str,
        caption_language: &str,
        timeout: Duration,
    ) -> Result<Self, SourceExtractorError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceExtractorError::FetchFailed(format!("http client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            caption_language: caption_language.to_string(),
        })
    }

    async fn fetch_captions(&self, video_id: &VideoId) -> Result<String, SourceExtractorError> {
        let url = format!("{}/api/timedtext", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("v", video_id.as_str()),
                ("lang", self.caption_language.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SourceExtractorError::FetchFailed(format!("transcript request: {e}")))?;

        if !response.status().is_success() {
            return Err(SourceExtractorError::FetchFailed(format!(
                "transcript for {video_id} returned HTTP {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SourceExtractorError::FetchFailed(format!("transcript body: {e}")))
    }
}

/// Collects the text of every `<text>` segment in a timed-text document.
pub fn parse_timed_text(xml: &str) -> Result<Vec<String>, SourceExtractorError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut segments = Vec::new();
    let mut in_segment = false;
    let mut current = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"text" => {
                in_segment = true;
                current.clear();
            }
            Ok(Event::Text(e)) if in_segment => {
                let unescaped = e.unescape().map_err(|err| {
                    SourceExtractorError::ExtractionFailed(format!("transcript text: {err}"))
                })?;
                current.push_str(&unescaped);
            }
            Ok(Event::CData(e)) if in_segment => {
                current.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"text" => {
                in_segment = false;
                let segment = sanitize_inline(&decode_entities(&current));
                if !segment.is_empty() {
                    segments.push(segment);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(SourceExtractorError::ExtractionFailed(format!(
                    "malformed transcript at byte {}: {e}",
                    reader.buffer_position()
                )));
            }
        }
    }

    Ok(segments)
}

#[async_trait]
impl SourceExtractor for YouTubeTranscriptAdapter {
    #[tracing::instrument(skip(self, input))]
    async fn extract_text(&self, input: &SourceInput) -> Result<String, SourceExtractorError> {
        let SourceInput::YouTube(raw_url) = input else {
            return Err(SourceExtractorError::UnsupportedSource(input.modality()));
        };

        let video_id = VideoId::parse(raw_url)
            .map_err(|e| SourceExtractorError::InvalidInput(e.to_string()))?;

        let xml = self.fetch_captions(&video_id).await?;
        let segments = parse_timed_text(&xml)?;
        tracing::info!(video_id = %video_id, segments = segments.len(), "Transcript fetched");

        if segments.is_empty() {
            return Err(SourceExtractorError::NoTextFound(format!(
                "transcript for {video_id}"
            )));
        }

        Ok(segments.join(" "))
    }
}
