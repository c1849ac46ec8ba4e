use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{FakeNewsDetector, ModelInferenceError};
use crate::domain::{FakeNewsVerdict, NewsLabel};

use super::HfInferenceClient;

pub const DEFAULT_FAKE_NEWS_MODEL: &str = "Pulk17/Fake-News-Detection";

#[derive(Debug, Clone, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

/// Text-classification responses come either flat or nested per input.
#[derive(Deserialize)]
#[serde(untagged)]
enum ClassificationOutput {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationOutput {
    fn into_scores(self) -> Vec<LabelScore> {
        match self {
            ClassificationOutput::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            ClassificationOutput::Flat(scores) => scores,
        }
    }
}

pub struct HfFakeNewsDetector {
    client: Arc<HfInferenceClient>,
    model: String,
}

impl HfFakeNewsDetector {
    pub fn new(client: Arc<HfInferenceClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

/// Picks the highest scoring label and maps it onto a verdict.
pub fn verdict_from_scores(scores: &[LabelScore]) -> Result<FakeNewsVerdict, ModelInferenceError> {
    let best = scores
        .iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| ModelInferenceError::InvalidResponse("no labels returned".to_string()))?;

    let label = NewsLabel::from_model_label(&best.label).ok_or_else(|| {
        ModelInferenceError::InvalidResponse(format!("unknown label: {}", best.label))
    })?;

    FakeNewsVerdict::new(label, best.score).map_err(ModelInferenceError::InvalidResponse)
}

#[async_trait]
impl FakeNewsDetector for HfFakeNewsDetector {
    async fn detect(&self, text: &str) -> Result<FakeNewsVerdict, ModelInferenceError> {
        let output: ClassificationOutput = self
            .client
            .infer(&self.model, text, serde_json::json!({}))
            .await?;

        let verdict = verdict_from_scores(&output.into_scores())?;
        tracing::debug!(label = %verdict.label, confidence = verdict.confidence, "Fake news verdict");
        Ok(verdict)
    }
}
