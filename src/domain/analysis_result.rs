use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::{DocumentId, EntitySet, FakeNewsVerdict, Sentiment, Topic};

/// One independently computed field of an [`AnalysisResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    Category,
    Summary,
    Topics,
    Entities,
    Sentiment,
    FakeNews,
}

impl Facet {
    pub const ALL: [Facet; 6] = [
        Facet::Category,
        Facet::Summary,
        Facet::Topics,
        Facet::Entities,
        Facet::Sentiment,
        Facet::FakeNews,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Category => "category",
            Facet::Summary => "summary",
            Facet::Topics => "topics",
            Facet::Entities => "entities",
            Facet::Sentiment => "sentiment",
            Facet::FakeNews => "fake_news",
        }
    }
}

impl FromStr for Facet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "category" => Ok(Facet::Category),
            "summary" => Ok(Facet::Summary),
            "topics" => Ok(Facet::Topics),
            "entities" => Ok(Facet::Entities),
            "sentiment" => Ok(Facet::Sentiment),
            "fake_news" | "fakenews" => Ok(Facet::FakeNews),
            other => Err(format!("Invalid facet: {}", other)),
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FacetOutcome<T> {
    Available(T),
    Unavailable(String),
}

impl<T> FacetOutcome<T> {
    pub fn as_available(&self) -> Option<&T> {
        match self {
            FacetOutcome::Available(value) => Some(value),
            FacetOutcome::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, FacetOutcome::Available(_))
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            FacetOutcome::Available(_) => None,
            FacetOutcome::Unavailable(reason) => Some(reason),
        }
    }
}

/// Aggregate of one analysis pass over one document. Replaced wholesale by
/// the next pass, never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub document_id: DocumentId,
    pub category: FacetOutcome<String>,
    pub summary: FacetOutcome<String>,
    pub topics: FacetOutcome<Vec<Topic>>,
    pub entities: FacetOutcome<EntitySet>,
    pub sentiment: FacetOutcome<Sentiment>,
    pub fake_news: FacetOutcome<FakeNewsVerdict>,
    pub completed_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn unavailable_facets(&self) -> Vec<Facet> {
        let flags = [
            (Facet::Category, self.category.is_available()),
            (Facet::Summary, self.summary.is_available()),
            (Facet::Topics, self.topics.is_available()),
            (Facet::Entities, self.entities.is_available()),
            (Facet::Sentiment, self.sentiment.is_available()),
            (Facet::FakeNews, self.fake_news.is_available()),
        ];
        flags
            .into_iter()
            .filter(|(_, available)| !available)
            .map(|(facet, _)| facet)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.unavailable_facets().is_empty()
    }

    /// Words of the highest ranked topic, empty when topics are unavailable.
    pub fn keywords(&self) -> Vec<String> {
        self.topics
            .as_available()
            .and_then(|topics| topics.first())
            .map(|topic| topic.words().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
