use async_trait::async_trait;

use super::ModelInferenceError;
use crate::domain::{NormalizedText, Topic};

#[async_trait]
pub trait TopicModel: Send + Sync {
    /// Returns at most `top_n` topics ranked by document probability.
    async fn topics(
        &self,
        text: &NormalizedText,
        top_n: usize,
    ) -> Result<Vec<Topic>, ModelInferenceError>;
}
