use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{Translator, TranslatorError};
use crate::domain::SourceLanguage;

const TARGET_LANGUAGE: &str = "en";

/// Client for a LibreTranslate-compatible `/translate` endpoint.
pub struct LibreTranslateClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[derive(Deserialize)]
struct TranslateErrorBody {
    error: String,
}

impl LibreTranslateClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, TranslatorError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranslatorError::RequestFailed(format!("http client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            timeout,
        })
    }
}

#[async_trait]
impl Translator for LibreTranslateClient {
    async fn translate(
        &self,
        chunk: &str,
        source: SourceLanguage,
    ) -> Result<String, TranslatorError> {
        let body = TranslateRequest {
            q: chunk,
            source: source.code(),
            target: TARGET_LANGUAGE,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslatorError::TimedOut(self.timeout.as_millis() as u64)
                } else {
                    TranslatorError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<TranslateErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or(text);
            return Err(TranslatorError::RequestFailed(format!(
                "HTTP {}: {}",
                status, detail
            )));
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslatorError::InvalidResponse(e.to_string()))?;

        Ok(parsed.translated_text)
    }
}
