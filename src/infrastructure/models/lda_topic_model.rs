use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{ModelInferenceError, TopicModel};
use crate::domain::{NormalizedText, Topic, TopicKeyword};

use super::artifacts::load_json_artifact;

const GAMMA_THRESHOLD: f64 = 0.001;
const PHI_EPSILON: f64 = 1e-100;

/// Trained LDA model: per-topic word distributions over a fixed vocabulary and
/// the document-topic Dirichlet prior.
#[derive(Debug, Clone, Deserialize)]
pub struct LdaArtifact {
    pub vocabulary: Vec<String>,
    pub topic_word: Vec<Vec<f64>>,
    pub alpha: Vec<f64>,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default = "default_minimum_probability")]
    pub minimum_probability: f64,
    #[serde(default = "default_keywords_per_topic")]
    pub keywords_per_topic: usize,
}

fn default_iterations() -> usize {
    50
}

fn default_minimum_probability() -> f64 {
    0.01
}

fn default_keywords_per_topic() -> usize {
    10
}

pub struct LdaTopicModel {
    word_ids: HashMap<String, usize>,
    topic_word: Vec<Vec<f64>>,
    alpha: Vec<f64>,
    iterations: usize,
    minimum_probability: f64,
    keywords: Vec<Vec<TopicKeyword>>,
}

impl LdaTopicModel {
    pub fn load(path: &Path) -> Result<Self, ModelInferenceError> {
        let artifact: LdaArtifact = load_json_artifact(path)?;
        tracing::info!(
            path = %path.display(),
            topics = artifact.topic_word.len(),
            vocabulary = artifact.vocabulary.len(),
            "Loaded topic model"
        );
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: LdaArtifact) -> Result<Self, ModelInferenceError> {
        let vocabulary_size = artifact.vocabulary.len();
        let topic_count = artifact.topic_word.len();

        if topic_count == 0 || vocabulary_size == 0 {
            return Err(ModelInferenceError::ModelLoadFailed(
                "topic model has no topics or no vocabulary".to_string(),
            ));
        }

        let alpha = match artifact.alpha.as_slice() {
            [symmetric] => vec![*symmetric; topic_count],
            prior if prior.len() == topic_count => prior.to_vec(),
            prior => {
                return Err(ModelInferenceError::ModelLoadFailed(format!(
                    "alpha has {} entries for {} topics",
                    prior.len(),
                    topic_count
                )));
            }
        };
        if alpha.iter().any(|a| *a <= 0.0) {
            return Err(ModelInferenceError::ModelLoadFailed(
                "alpha entries must be positive".to_string(),
            ));
        }

        let mut topic_word = Vec::with_capacity(topic_count);
        for (topic, row) in artifact.topic_word.into_iter().enumerate() {
            let total: f64 = row.iter().sum();
            if row.len() != vocabulary_size || total <= 0.0 || row.iter().any(|p| *p < 0.0) {
                return Err(ModelInferenceError::ModelLoadFailed(format!(
                    "topic {topic} is not a distribution over the vocabulary"
                )));
            }
            topic_word.push(row.into_iter().map(|p| p / total).collect::<Vec<f64>>());
        }

        let keywords = topic_word
            .iter()
            .map(|row| top_keywords(row, &artifact.vocabulary, artifact.keywords_per_topic))
            .collect();

        let word_ids = artifact
            .vocabulary
            .into_iter()
            .enumerate()
            .map(|(id, word)| (word, id))
            .collect();

        Ok(Self {
            word_ids,
            topic_word,
            alpha,
            iterations: artifact.iterations.max(1),
            minimum_probability: artifact.minimum_probability,
            keywords,
        })
    }

    fn bag_of_words(&self, text: &NormalizedText) -> Vec<(usize, f64)> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in text.tokens() {
            if let Some(&id) = self.word_ids.get(token) {
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
        }
        let mut bow: Vec<(usize, f64)> = counts.into_iter().collect();
        bow.sort_by_key(|(id, _)| *id);
        bow
    }

    /// Variational E-step for one document; returns the normalized topic
    /// proportions. Words outside the vocabulary are ignored.
    pub fn topic_distribution(&self, text: &NormalizedText) -> Vec<f64> {
        let bow = self.bag_of_words(text);
        let topic_count = self.alpha.len();
        let total_words: f64 = bow.iter().map(|(_, count)| count).sum();

        let mut gamma: Vec<f64> = self
            .alpha
            .iter()
            .map(|a| a + total_words / topic_count as f64)
            .collect();

        for _ in 0..self.iterations {
            let gamma_sum: f64 = gamma.iter().sum();
            let digamma_sum = digamma(gamma_sum);
            let exp_e_log_theta: Vec<f64> = gamma
                .iter()
                .map(|g| (digamma(*g) - digamma_sum).exp())
                .collect();

            let mut next = self.alpha.clone();
            for &(word, count) in &bow {
                let phinorm: f64 = (0..topic_count)
                    .map(|t| exp_e_log_theta[t] * self.topic_word[t][word])
                    .sum::<f64>()
                    + PHI_EPSILON;
                for (t, value) in next.iter_mut().enumerate() {
                    *value += exp_e_log_theta[t] * count * self.topic_word[t][word] / phinorm;
                }
            }

            let mean_change = gamma
                .iter()
                .zip(&next)
                .map(|(old, new)| (old - new).abs())
                .sum::<f64>()
                / topic_count as f64;
            gamma = next;
            if mean_change < GAMMA_THRESHOLD {
                break;
            }
        }

        let gamma_sum: f64 = gamma.iter().sum();
        gamma.into_iter().map(|g| g / gamma_sum).collect()
    }
}

fn top_keywords(row: &[f64], vocabulary: &[String], limit: usize) -> Vec<TopicKeyword> {
    let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(id, weight)| TopicKeyword {
            word: vocabulary[id].clone(),
            weight: weight as f32,
        })
        .collect()
}

/// Digamma via recurrence up to x >= 6 and the asymptotic series.
fn digamma(mut x: f64) -> f64 {
    let mut result = 0.0;
    while x < 6.0 {
        result -= 1.0 / x;
        x += 1.0;
    }
    let inv = 1.0 / x;
    let inv2 = inv * inv;
    result + x.ln() - 0.5 * inv
        - inv2 * (1.0 / 12.0 - inv2 * (1.0 / 120.0 - inv2 * (1.0 / 252.0)))
}

#[async_trait]
impl TopicModel for LdaTopicModel {
    async fn topics(
        &self,
        text: &NormalizedText,
        top_n: usize,
    ) -> Result<Vec<Topic>, ModelInferenceError> {
        let distribution = self.topic_distribution(text);

        let mut ranked: Vec<(usize, f64)> = distribution
            .into_iter()
            .enumerate()
            .filter(|(_, p)| *p >= self.minimum_probability)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        Ok(ranked
            .into_iter()
            .take(top_n)
            .map(|(id, probability)| Topic {
                id: id as u32,
                probability: probability as f32,
                keywords: self.keywords[id].clone(),
            })
            .collect())
    }
}
