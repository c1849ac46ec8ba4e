use std::collections::HashMap;

use crate::application::ports::{
    CategoryClassifier, EntityExtractor, FakeNewsDetector, ModelInferenceError,
    SentimentAnalyzer, Summarizer, SummaryLength, TopicModel,
};
use crate::domain::{Entity, FakeNewsVerdict, NewsLabel, NormalizedText, Topic, TopicKeyword};

pub struct MockCategoryClassifier;

#[async_trait::async_trait]
impl CategoryClassifier for MockCategoryClassifier {
    async fn classify(&self, _text: &NormalizedText) -> Result<String, ModelInferenceError> {
        Ok("business".to_string())
    }
}

/// Echoes the leading sentence, capped at `max_length` words.
pub struct MockSummarizer;

#[async_trait::async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(
        &self,
        text: &str,
        length: SummaryLength,
    ) -> Result<String, ModelInferenceError> {
        let first_sentence = text
            .split_inclusive(['.', '!', '?'])
            .next()
            .unwrap_or(text);
        Ok(first_sentence
            .split_whitespace()
            .take(length.max_length)
            .collect::<Vec<_>>()
            .join(" "))
    }
}

/// One topic made of the most frequent tokens.
pub struct MockTopicModel;

#[async_trait::async_trait]
impl TopicModel for MockTopicModel {
    async fn topics(
        &self,
        text: &NormalizedText,
        top_n: usize,
    ) -> Result<Vec<Topic>, ModelInferenceError> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in text.tokens() {
            *counts.entry(token).or_insert(0) += 1;
        }
        let total = counts.values().sum::<usize>().max(1) as f32;
        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

        let keywords: Vec<TopicKeyword> = ranked
            .into_iter()
            .take(10)
            .map(|(word, count)| TopicKeyword {
                word: word.to_string(),
                weight: count as f32 / total,
            })
            .collect();

        if keywords.is_empty() || top_n == 0 {
            return Ok(Vec::new());
        }
        Ok(vec![Topic {
            id: 0,
            probability: 1.0,
            keywords,
        }])
    }
}

/// Tags capitalized words that do not start a sentence.
pub struct MockEntityExtractor;

#[async_trait::async_trait]
impl EntityExtractor for MockEntityExtractor {
    async fn extract_entities(&self, text: &str) -> Result<Vec<Entity>, ModelInferenceError> {
        let mut entities = Vec::new();
        let mut sentence_start = true;
        for word in text.split_whitespace() {
            let trimmed = word.trim_matches(|c: char| !c.is_alphanumeric());
            let capitalized = trimmed.chars().next().is_some_and(char::is_uppercase);
            if capitalized && !sentence_start {
                entities.push(Entity::new(trimmed, "MISC"));
            }
            sentence_start = word.ends_with(['.', '!', '?']);
        }
        Ok(entities)
    }
}

pub struct MockSentimentAnalyzer;

#[async_trait::async_trait]
impl SentimentAnalyzer for MockSentimentAnalyzer {
    async fn polarity(&self, _text: &str) -> Result<f64, ModelInferenceError> {
        Ok(0.0)
    }
}

pub struct MockFakeNewsDetector;

#[async_trait::async_trait]
impl FakeNewsDetector for MockFakeNewsDetector {
    async fn detect(&self, _text: &str) -> Result<FakeNewsVerdict, ModelInferenceError> {
        FakeNewsVerdict::new(NewsLabel::Real, 0.5).map_err(ModelInferenceError::InvalidResponse)
    }
}
