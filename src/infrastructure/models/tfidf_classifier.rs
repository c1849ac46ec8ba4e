use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{CategoryClassifier, ModelInferenceError};
use crate::domain::NormalizedText;

use super::artifacts::load_json_artifact;

/// Exported TF-IDF vectorizer plus one-vs-rest linear model.
///
/// `coef` has one row per class, or a single row for a binary model where a
/// positive score selects `classes[1]`.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfClassifierArtifact {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 3)
}

pub struct TfidfLinearClassifier {
    artifact: TfidfClassifierArtifact,
}

impl TfidfLinearClassifier {
    pub fn load(path: &Path) -> Result<Self, ModelInferenceError> {
        let artifact: TfidfClassifierArtifact = load_json_artifact(path)?;
        tracing::info!(
            path = %path.display(),
            classes = artifact.classes.len(),
            features = artifact.idf.len(),
            "Loaded category classifier"
        );
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: TfidfClassifierArtifact) -> Result<Self, ModelInferenceError> {
        let invalid = |reason: String| Err(ModelInferenceError::ModelLoadFailed(reason));
        let features = artifact.idf.len();
        let (min_n, max_n) = artifact.ngram_range;

        if artifact.classes.len() < 2 {
            return invalid("classifier needs at least two classes".to_string());
        }
        if min_n == 0 || min_n > max_n {
            return invalid(format!("invalid ngram range {:?}", artifact.ngram_range));
        }
        if let Some((term, index)) = artifact.vocabulary.iter().find(|(_, i)| **i >= features) {
            return invalid(format!("term '{term}' maps to feature {index} of {features}"));
        }

        let binary = artifact.classes.len() == 2 && artifact.coef.len() == 1;
        if !binary && artifact.coef.len() != artifact.classes.len() {
            return invalid(format!(
                "{} coefficient rows for {} classes",
                artifact.coef.len(),
                artifact.classes.len()
            ));
        }
        if artifact.coef.iter().any(|row| row.len() != features) {
            return invalid("coefficient row width differs from vocabulary size".to_string());
        }
        if artifact.intercept.len() != artifact.coef.len() {
            return invalid("intercept length differs from coefficient rows".to_string());
        }

        Ok(Self { artifact })
    }

    /// L2-normalized TF-IDF vector as sparse `(feature, weight)` pairs.
    pub fn vectorize(&self, text: &NormalizedText) -> Vec<(usize, f64)> {
        let tokens: Vec<&str> = text.tokens().collect();
        let (min_n, max_n) = self.artifact.ngram_range;
        let mut counts: HashMap<usize, f64> = HashMap::new();

        for n in min_n..=max_n {
            for window in tokens.windows(n) {
                let ngram = window.join(" ");
                if let Some(&index) = self.artifact.vocabulary.get(&ngram) {
                    *counts.entry(index).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut weighted: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, tf)| {
                let tf = if self.artifact.sublinear_tf {
                    1.0 + tf.ln()
                } else {
                    tf
                };
                (index, tf * self.artifact.idf[index])
            })
            .collect();

        let norm = weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut weighted {
                *weight /= norm;
            }
        }
        weighted.sort_by_key(|(index, _)| *index);
        weighted
    }

    pub fn predict(&self, text: &NormalizedText) -> &str {
        let features = self.vectorize(text);
        let scores: Vec<f64> = self
            .artifact
            .coef
            .iter()
            .zip(&self.artifact.intercept)
            .map(|(row, bias)| bias + features.iter().map(|(i, w)| row[*i] * w).sum::<f64>())
            .collect();

        let class_index = if scores.len() == 1 {
            usize::from(scores[0] > 0.0)
        } else {
            // first maximum wins ties
            (1..scores.len()).fold(0, |best, i| if scores[i] > scores[best] { i } else { best })
        };

        &self.artifact.classes[class_index]
    }
}

#[async_trait]
impl CategoryClassifier for TfidfLinearClassifier {
    async fn classify(&self, text: &NormalizedText) -> Result<String, ModelInferenceError> {
        let category = self.predict(text).to_string();
        tracing::debug!(category = %category, "Category predicted");
        Ok(category)
    }
}
