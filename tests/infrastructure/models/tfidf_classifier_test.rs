use std::collections::HashMap;
use std::io::Write;

use newssense::application::ports::{CategoryClassifier, ModelInferenceError};
use newssense::application::services::TextNormalizer;
use newssense::infrastructure::models::{TfidfClassifierArtifact, TfidfLinearClassifier};

fn vocabulary(terms: &[&str]) -> HashMap<String, usize> {
    terms
        .iter()
        .enumerate()
        .map(|(i, t)| (t.to_string(), i))
        .collect()
}

/// Three classes over five features; "interest rate" is a bigram feature.
fn multiclass_artifact() -> TfidfClassifierArtifact {
    TfidfClassifierArtifact {
        vocabulary: vocabulary(&["bank", "match", "election", "interest rate", "goal"]),
        idf: vec![1.0, 1.0, 1.0, 2.0, 1.0],
        ngram_range: (1, 2),
        sublinear_tf: false,
        classes: vec![
            "business".to_string(),
            "sport".to_string(),
            "politics".to_string(),
        ],
        coef: vec![
            vec![2.0, 0.0, 0.0, 3.0, 0.0],
            vec![0.0, 2.0, 0.0, 0.0, 2.0],
            vec![0.0, 0.0, 2.5, 0.0, 0.0],
        ],
        intercept: vec![0.0, 0.0, 0.0],
    }
}

fn normalize(text: &str) -> newssense::domain::NormalizedText {
    TextNormalizer::with_stopwords(&["the", "a", "of"]).normalize(text)
}

#[tokio::test]
async fn given_business_text_when_classifying_then_picks_business() {
    let classifier = TfidfLinearClassifier::from_artifact(multiclass_artifact()).unwrap();

    let category = classifier
        .classify(&normalize("The bank raised the interest rate"))
        .await
        .unwrap();

    assert_eq!(category, "business");
}

#[tokio::test]
async fn given_sport_text_when_classifying_then_picks_sport() {
    let classifier = TfidfLinearClassifier::from_artifact(multiclass_artifact()).unwrap();

    let category = classifier
        .classify(&normalize("A late goal decided the match"))
        .await
        .unwrap();

    assert_eq!(category, "sport");
}

#[test]
fn given_text_when_vectorizing_then_vector_is_unit_length_and_counts_bigrams() {
    let classifier = TfidfLinearClassifier::from_artifact(multiclass_artifact()).unwrap();

    let vector = classifier.vectorize(&normalize("interest rate bank"));

    let features: Vec<usize> = vector.iter().map(|(i, _)| *i).collect();
    assert_eq!(features, vec![0, 3]);
    let norm: f64 = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    assert!((norm - 1.0).abs() < 1e-9);
}

#[test]
fn given_text_without_known_terms_when_predicting_then_first_class_wins_tie() {
    let classifier = TfidfLinearClassifier::from_artifact(multiclass_artifact()).unwrap();

    assert!(classifier.vectorize(&normalize("weather forecast")).is_empty());
    assert_eq!(classifier.predict(&normalize("weather forecast")), "business");
}

#[test]
fn given_binary_model_when_predicting_then_positive_score_selects_second_class() {
    let artifact = TfidfClassifierArtifact {
        vocabulary: vocabulary(&["hoax", "official"]),
        idf: vec![1.0, 1.0],
        ngram_range: (1, 1),
        sublinear_tf: true,
        classes: vec!["real".to_string(), "fake".to_string()],
        coef: vec![vec![1.5, -1.5]],
        intercept: vec![0.0],
    };
    let classifier = TfidfLinearClassifier::from_artifact(artifact).unwrap();

    assert_eq!(classifier.predict(&normalize("hoax hoax")), "fake");
    assert_eq!(classifier.predict(&normalize("official statement")), "real");
}

#[test]
fn given_mismatched_coefficients_when_loading_then_rejects() {
    let mut artifact = multiclass_artifact();
    artifact.coef.pop();

    let result = TfidfLinearClassifier::from_artifact(artifact);

    assert!(matches!(result, Err(ModelInferenceError::ModelLoadFailed(_))));
}

#[test]
fn given_vocabulary_index_out_of_range_when_loading_then_rejects() {
    let mut artifact = multiclass_artifact();
    artifact.vocabulary.insert("stray".to_string(), 99);

    assert!(TfidfLinearClassifier::from_artifact(artifact).is_err());
}

#[test]
fn given_json_artifact_file_when_loading_then_uses_default_ngram_range() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "vocabulary": {{"bank": 0, "central bank": 1, "goal": 2}},
            "idf": [1.0, 1.0, 1.0],
            "classes": ["business", "sport"],
            "coef": [[1.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            "intercept": [0.0, 0.0]
        }}"#
    )
    .unwrap();

    let classifier = TfidfLinearClassifier::load(file.path()).unwrap();

    assert_eq!(classifier.predict(&normalize("central bank")), "business");
    assert_eq!(classifier.vectorize(&normalize("central bank")).len(), 2);
}

#[test]
fn given_missing_artifact_when_loading_then_returns_load_failure() {
    let result = TfidfLinearClassifier::load(std::path::Path::new("/nonexistent/model.json"));

    assert!(matches!(result, Err(ModelInferenceError::ModelLoadFailed(_))));
}
