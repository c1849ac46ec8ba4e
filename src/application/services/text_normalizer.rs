use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use stop_words::{LANGUAGE, get};

use crate::domain::NormalizedText;

static NON_ALPHABETIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z\s]").unwrap());

/// Irregular plurals and words that look plural but are already lemmas.
const IRREGULAR_LEMMAS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("news", "news"),
    ("series", "series"),
    ("species", "species"),
    ("politics", "politics"),
    ("economics", "economics"),
    ("physics", "physics"),
    ("olympics", "olympics"),
    ("headquarters", "headquarters"),
    ("always", "always"),
    ("perhaps", "perhaps"),
];

const MAX_LEMMA_PASSES: usize = 4;

/// Lossy text normalization shared by the classifier and the topic model.
///
/// Digits and punctuation are deleted, not replaced, so dates and figures do
/// not survive. The transform is idempotent: every emitted token is already a
/// non-stopword lemma.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stopwords: HashSet<String>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let stopwords = get(LANGUAGE::English)
            .iter()
            .map(|s| s.to_lowercase())
            .collect();
        Self { stopwords }
    }

    pub fn with_stopwords(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn normalize(&self, text: &str) -> NormalizedText {
        let lowered = text.to_lowercase();
        let alphabetic = NON_ALPHABETIC.replace_all(&lowered, "");

        let tokens = alphabetic
            .split_whitespace()
            .filter(|token| !self.is_stopword(token))
            .map(lemmatize)
            .filter(|lemma| !self.is_stopword(lemma))
            .collect();

        NormalizedText::from_tokens(tokens)
    }
}

/// Noun lemmatization, applied until the token stops changing.
pub fn lemmatize(token: &str) -> String {
    let mut current = token.to_string();
    for _ in 0..MAX_LEMMA_PASSES {
        let next = lemmatize_once(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn lemmatize_once(token: &str) -> String {
    if let Some((_, lemma)) = IRREGULAR_LEMMAS.iter().find(|(word, _)| *word == token) {
        return (*lemma).to_string();
    }

    if token.len() <= 3 || ["ss", "us", "is"].iter().any(|s| token.ends_with(s)) {
        return token.to_string();
    }

    if let Some(stem) = token.strip_suffix("ies") {
        if stem.len() >= 2 {
            return format!("{}y", stem);
        }
    }

    if let Some(stem) = token.strip_suffix("es") {
        if ["ss", "x", "ch", "sh", "zz"].iter().any(|s| stem.ends_with(s)) {
            return stem.to_string();
        }
    }

    match token.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => token.to_string(),
    }
}
