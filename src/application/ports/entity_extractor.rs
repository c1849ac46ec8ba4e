use async_trait::async_trait;

use super::ModelInferenceError;
use crate::domain::Entity;

#[async_trait]
pub trait EntityExtractor: Send + Sync {
    /// May return duplicates; deduplication happens during aggregation.
    async fn extract_entities(&self, text: &str) -> Result<Vec<Entity>, ModelInferenceError>;
}
