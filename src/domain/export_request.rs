use std::fmt;

use super::{AnalysisResult, EntitySet, FacetOutcome, Sentiment};

const PDF_EXTENSION: &str = ".pdf";
pub const UNAVAILABLE_PLACEHOLDER: &str = "Unavailable";

/// Output filename for a report, always ending in `.pdf` and never a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFilename(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportFilenameError {
    #[error("filename must not contain path components: {0}")]
    PathComponent(String),
}

impl ReportFilename {
    pub fn parse(raw: &str, default_stem: &str) -> Result<Self, ReportFilenameError> {
        let trimmed = raw.trim();
        let stem = if trimmed.is_empty() {
            default_stem.trim()
        } else {
            trimmed
        };

        if stem.contains('/') || stem.contains('\\') || stem.contains("..") {
            return Err(ReportFilenameError::PathComponent(stem.to_string()));
        }

        let name = if stem.to_lowercase().ends_with(PDF_EXTENSION) {
            stem.to_string()
        } else {
            format!("{}{}", stem, PDF_EXTENSION)
        };

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of an aggregated analysis shaped for the report exporter.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub category: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub sentiment: Option<Sentiment>,
    pub entities: EntitySet,
    pub filename: ReportFilename,
}

impl ExportRequest {
    pub fn from_result(result: &AnalysisResult, filename: ReportFilename) -> Self {
        Self {
            category: text_or_placeholder(&result.category),
            summary: text_or_placeholder(&result.summary),
            keywords: result.keywords(),
            sentiment: result.sentiment.as_available().copied(),
            entities: result.entities.as_available().cloned().unwrap_or_default(),
            filename,
        }
    }

    pub fn sentiment_label(&self) -> &'static str {
        self.sentiment
            .map(|s| s.as_str())
            .unwrap_or(UNAVAILABLE_PLACEHOLDER)
    }
}

fn text_or_placeholder(outcome: &FacetOutcome<String>) -> String {
    outcome
        .as_available()
        .cloned()
        .unwrap_or_else(|| UNAVAILABLE_PLACEHOLDER.to_string())
}
