use async_trait::async_trait;

use super::ModelInferenceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLength {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for SummaryLength {
    fn default() -> Self {
        Self {
            min_length: 30,
            max_length: 130,
        }
    }
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// `text` is already capped to the model's input limit.
    async fn summarize(
        &self,
        text: &str,
        length: SummaryLength,
    ) -> Result<String, ModelInferenceError>;
}
