use async_trait::async_trait;

use super::ModelInferenceError;
use crate::domain::NormalizedText;

#[async_trait]
pub trait CategoryClassifier: Send + Sync {
    async fn classify(&self, text: &NormalizedText) -> Result<String, ModelInferenceError>;
}
