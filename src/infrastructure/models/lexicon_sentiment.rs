use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::application::ports::{ModelInferenceError, SentimentAnalyzer};

use super::artifacts::load_json_artifact;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").unwrap());

const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "cannot", "can't",
    "don't", "doesn't", "didn't", "isn't", "wasn't", "aren't", "weren't", "won't", "hardly",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("really", 1.2),
    ("so", 1.2),
    ("deeply", 1.3),
    ("slightly", 0.6),
    ("somewhat", 0.7),
    ("barely", 0.5),
];

const BUILTIN_LEXICON: &[(&str, f64)] = &[
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("positive", 0.23),
    ("success", 0.6),
    ("successful", 0.75),
    ("win", 0.8),
    ("won", 0.6),
    ("gain", 0.4),
    ("gains", 0.4),
    ("growth", 0.4),
    ("grow", 0.3),
    ("profit", 0.4),
    ("profits", 0.4),
    ("profitable", 0.5),
    ("rise", 0.2),
    ("rose", 0.2),
    ("record", 0.2),
    ("strong", 0.43),
    ("improve", 0.4),
    ("improved", 0.4),
    ("recovery", 0.4),
    ("happy", 0.8),
    ("hope", 0.4),
    ("peace", 0.5),
    ("safe", 0.5),
    ("celebrate", 0.6),
    ("praised", 0.6),
    ("welcome", 0.8),
    ("boost", 0.4),
    ("easing", 0.2),
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("negative", -0.3),
    ("loss", -0.5),
    ("losses", -0.5),
    ("lose", -0.5),
    ("lost", -0.4),
    ("decline", -0.4),
    ("declined", -0.4),
    ("fall", -0.3),
    ("fell", -0.3),
    ("drop", -0.3),
    ("weak", -0.4),
    ("crisis", -0.7),
    ("war", -0.7),
    ("attack", -0.6),
    ("killed", -0.8),
    ("death", -0.7),
    ("dead", -0.6),
    ("injured", -0.6),
    ("violence", -0.8),
    ("fraud", -0.8),
    ("corruption", -0.8),
    ("scandal", -0.7),
    ("fear", -0.6),
    ("angry", -0.6),
    ("sad", -0.5),
    ("fail", -0.6),
    ("failed", -0.6),
    ("failure", -0.7),
    ("disaster", -0.9),
    ("protest", -0.3),
    ("threat", -0.5),
    ("risk", -0.3),
    ("poor", -0.4),
];

/// Lexicon-based polarity in `[-1, 1]`: the mean polarity of matched words,
/// scaled by a preceding intensifier and damped and flipped by a nearby
/// negation. Text without any lexicon word scores `0.0`.
pub struct LexiconSentimentAnalyzer {
    lexicon: HashMap<String, f64>,
}

impl Default for LexiconSentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconSentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            lexicon: BUILTIN_LEXICON
                .iter()
                .map(|(word, polarity)| (word.to_string(), *polarity))
                .collect(),
        }
    }

    /// Built-in lexicon overlaid with a JSON object of `word -> polarity`.
    pub fn with_lexicon_file(path: &Path) -> Result<Self, ModelInferenceError> {
        let overrides: HashMap<String, f64> = load_json_artifact(path)?;
        if let Some((word, polarity)) = overrides.iter().find(|(_, p)| !(-1.0..=1.0).contains(*p)) {
            return Err(ModelInferenceError::ModelLoadFailed(format!(
                "polarity for '{word}' out of range: {polarity}"
            )));
        }

        let mut analyzer = Self::new();
        let added = overrides.len();
        analyzer
            .lexicon
            .extend(overrides.into_iter().map(|(w, p)| (w.to_lowercase(), p)));
        tracing::info!(path = %path.display(), added, "Loaded sentiment lexicon");
        Ok(analyzer)
    }

    pub fn score(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = WORD.find_iter(&lowered).map(|m| m.as_str()).collect();

        let mut total = 0.0;
        let mut matched = 0usize;

        for (index, word) in words.iter().enumerate() {
            let Some(&base) = self.lexicon.get(*word) else {
                continue;
            };

            let mut polarity = base;
            if let Some(previous) = index.checked_sub(1).map(|i| words[i]) {
                if let Some((_, factor)) = INTENSIFIERS.iter().find(|(w, _)| *w == previous) {
                    polarity *= factor;
                }
            }

            let window_start = index.saturating_sub(NEGATION_WINDOW);
            if words[window_start..index].iter().any(|w| NEGATIONS.contains(w)) {
                polarity *= NEGATION_FACTOR;
            }

            total += polarity.clamp(-1.0, 1.0);
            matched += 1;
        }

        if matched == 0 {
            return 0.0;
        }
        (total / matched as f64).clamp(-1.0, 1.0)
    }
}

#[async_trait]
impl SentimentAnalyzer for LexiconSentimentAnalyzer {
    async fn polarity(&self, text: &str) -> Result<f64, ModelInferenceError> {
        Ok(self.score(text))
    }
}
