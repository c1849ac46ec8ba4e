use std::collections::BTreeSet;
use std::time::Duration;

use crate::application::ports::SummaryLength;
use crate::application::services::{ChunkFailurePolicy, InputLimit};
use crate::domain::Facet;

pub const DEFAULT_REPORT_STEM: &str = "news_summary";

/// BART's 1024 position window minus the BOS and EOS tokens.
pub const DEFAULT_SUMMARY_MAX_INPUT_TOKENS: usize = 1022;

/// BERT's 512 window with headroom for WordPiece splitting more finely than
/// GPT-2 BPE on names and numbers.
pub const DEFAULT_ENTITY_MAX_INPUT_TOKENS: usize = 400;

/// Knobs of one analysis pass.
///
/// A failed facet listed in `required_facets` fails the whole pass; any other
/// failed facet is reported as unavailable.
#[derive(Debug, Clone)]
pub struct AnalysisPolicy {
    pub required_facets: BTreeSet<Facet>,
    pub chunk_failure_policy: ChunkFailurePolicy,
    pub extraction_timeout: Duration,
    pub translation_chunk_timeout: Duration,
    pub inference_timeout: Duration,
    pub topic_count: usize,
    pub summary_length: SummaryLength,
    pub summary_input_limit: InputLimit,
    pub fake_news_input_limit: InputLimit,
    pub entity_input_limit: InputLimit,
    pub default_report_stem: String,
}

impl Default for AnalysisPolicy {
    fn default() -> Self {
        Self {
            required_facets: BTreeSet::from([Facet::Category, Facet::Summary]),
            chunk_failure_policy: ChunkFailurePolicy::default(),
            extraction_timeout: Duration::from_secs(60),
            translation_chunk_timeout: Duration::from_secs(30),
            inference_timeout: Duration::from_secs(120),
            topic_count: 1,
            summary_length: SummaryLength::default(),
            summary_input_limit: InputLimit::Tokens(DEFAULT_SUMMARY_MAX_INPUT_TOKENS),
            fake_news_input_limit: InputLimit::Characters(512),
            entity_input_limit: InputLimit::Tokens(DEFAULT_ENTITY_MAX_INPUT_TOKENS),
            default_report_stem: DEFAULT_REPORT_STEM.to_string(),
        }
    }
}

impl AnalysisPolicy {
    pub fn is_required(&self, facet: Facet) -> bool {
        self.required_facets.contains(&facet)
    }
}
