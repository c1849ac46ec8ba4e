use async_trait::async_trait;

use super::ModelInferenceError;

#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    /// Signed polarity in `[-1, 1]`.
    async fn polarity(&self, text: &str) -> Result<f64, ModelInferenceError>;
}
