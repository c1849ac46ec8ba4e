use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{SourceExtractor, SourceExtractorError};
use crate::domain::{SourceInput, SourceModality};

/// Routes each input to the extractor registered for its modality.
pub struct CompositeSourceExtractor {
    adapters: HashMap<SourceModality, Arc<dyn SourceExtractor>>,
}

impl CompositeSourceExtractor {
    pub fn new(adapters: Vec<(SourceModality, Arc<dyn SourceExtractor>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    pub fn supports(&self, modality: SourceModality) -> bool {
        self.adapters.contains_key(&modality)
    }
}

#[async_trait]
impl SourceExtractor for CompositeSourceExtractor {
    async fn extract_text(&self, input: &SourceInput) -> Result<String, SourceExtractorError> {
        let modality = input.modality();
        let adapter = self
            .adapters
            .get(&modality)
            .ok_or(SourceExtractorError::UnsupportedSource(modality))?;

        adapter.extract_text(input).await
    }
}
