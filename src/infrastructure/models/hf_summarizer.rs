use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{ModelInferenceError, Summarizer, SummaryLength};

use super::HfInferenceClient;

pub const DEFAULT_SUMMARIZATION_MODEL: &str = "facebook/bart-large-cnn";

#[derive(Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

/// Abstractive summaries from a hosted sequence-to-sequence model. Sampling is
/// disabled so identical input yields identical output.
pub struct HfSummarizer {
    client: Arc<HfInferenceClient>,
    model: String,
}

impl HfSummarizer {
    pub fn new(client: Arc<HfInferenceClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Summarizer for HfSummarizer {
    async fn summarize(
        &self,
        text: &str,
        length: SummaryLength,
    ) -> Result<String, ModelInferenceError> {
        let parameters = serde_json::json!({
            "min_length": length.min_length,
            "max_length": length.max_length,
            "do_sample": false,
        });

        let outputs: Vec<SummaryOutput> = self.client.infer(&self.model, text, parameters).await?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ModelInferenceError::InvalidResponse("empty summary".to_string()))
    }
}
