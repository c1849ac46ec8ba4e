use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::application::ports::{SourceExtractor, SourceExtractorError};
use crate::domain::SourceInput;

use crate::infrastructure::observability::preview_for_log;

use super::html_text::extract_article;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; newssense/0.1)";

/// Downloads a news article page and keeps its body paragraphs.
pub struct UrlArticleAdapter {
    client: Client,
}

impl UrlArticleAdapter {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, SourceExtractorError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| SourceExtractorError::FetchFailed(format!("http client: {e}")))?;
        Ok(Self { client })
    }

    fn parse_article_url(raw: &str) -> Result<Url, SourceExtractorError> {
        let url = Url::parse(raw.trim())
            .map_err(|e| SourceExtractorError::InvalidInput(format!("invalid URL '{raw}': {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SourceExtractorError::InvalidInput(format!(
                "unsupported URL scheme: {other}"
            ))),
        }
    }
}

#[async_trait]
impl SourceExtractor for UrlArticleAdapter {
    #[tracing::instrument(skip(self, input))]
    async fn extract_text(&self, input: &SourceInput) -> Result<String, SourceExtractorError> {
        let SourceInput::Url(raw) = input else {
            return Err(SourceExtractorError::UnsupportedSource(input.modality()));
        };
        let url = Self::parse_article_url(raw)?;
        tracing::debug!(url = %preview_for_log(url.as_str()), "Fetching article");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| SourceExtractorError::FetchFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceExtractorError::FetchFailed(format!(
                "{url} returned HTTP {}",
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| SourceExtractorError::FetchFailed(format!("{url}: {e}")))?;

        let article = extract_article(&html);
        tracing::debug!(
            title = article.title.as_deref().unwrap_or(""),
            paragraphs = article.paragraphs.len(),
            "Article parsed"
        );

        if article.paragraphs.is_empty() {
            return Err(SourceExtractorError::NoTextFound(url.to_string()));
        }

        Ok(article.body())
    }
}
