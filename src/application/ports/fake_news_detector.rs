use async_trait::async_trait;

use super::ModelInferenceError;
use crate::domain::FakeNewsVerdict;

#[async_trait]
pub trait FakeNewsDetector: Send + Sync {
    /// `text` is already capped to the detector's input limit.
    async fn detect(&self, text: &str) -> Result<FakeNewsVerdict, ModelInferenceError>;
}
