use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{EntityExtractor, ModelInferenceError};
use crate::domain::Entity;

use super::HfInferenceClient;

pub const DEFAULT_NER_MODEL: &str = "dslim/bert-base-NER";

#[derive(Debug, Clone, Deserialize)]
pub struct NerSpan {
    #[serde(default)]
    pub entity_group: Option<String>,
    #[serde(default)]
    pub entity: Option<String>,
    pub word: String,
}

/// Maps a model's label set onto the labels shown in results. Keys and values
/// are compared uppercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NerLabelMap(HashMap<String, String>);

impl NerLabelMap {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_uppercase(), v.as_ref().to_uppercase()))
                .collect(),
        )
    }

    /// Strips a `B-`/`I-` prefix, then applies the mapping.
    pub fn canonical(&self, raw: &str) -> String {
        let label = raw
            .strip_prefix("B-")
            .or_else(|| raw.strip_prefix("I-"))
            .unwrap_or(raw)
            .to_uppercase();
        self.0.get(&label).cloned().unwrap_or(label)
    }

    pub fn into_pairs(self) -> HashMap<String, String> {
        self.0
    }
}

impl Default for NerLabelMap {
    /// CoNLL-03 labels of `dslim/bert-base-NER` onto the spaCy-style set.
    fn default() -> Self {
        Self::new([("PER", "PERSON"), ("LOC", "GPE")])
    }
}

/// Named entities from a hosted token-classification model with span
/// aggregation.
pub struct HfEntityExtractor {
    client: Arc<HfInferenceClient>,
    model: String,
    labels: NerLabelMap,
}

impl HfEntityExtractor {
    pub fn new(client: Arc<HfInferenceClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            labels: NerLabelMap::default(),
        }
    }

    pub fn with_label_map(mut self, labels: NerLabelMap) -> Self {
        self.labels = labels;
        self
    }
}

/// Converts aggregated spans into labelled entities. Spans without a label or
/// with blank text are skipped.
pub fn entities_from_spans(spans: Vec<NerSpan>, labels: &NerLabelMap) -> Vec<Entity> {
    spans
        .into_iter()
        .filter_map(|span| {
            let raw_label = span.entity_group.or(span.entity)?;
            let text = span.word.replace(" ##", "").replace("##", "");
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(Entity::new(text, labels.canonical(&raw_label)))
        })
        .collect()
}

#[async_trait]
impl EntityExtractor for HfEntityExtractor {
    async fn extract_entities(&self, text: &str) -> Result<Vec<Entity>, ModelInferenceError> {
        let spans: Vec<NerSpan> = self
            .client
            .infer(
                &self.model,
                text,
                serde_json::json!({ "aggregation_strategy": "simple" }),
            )
            .await?;

        Ok(entities_from_spans(spans, &self.labels))
    }
}
