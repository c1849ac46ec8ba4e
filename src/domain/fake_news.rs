use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewsLabel {
    Real,
    Fake,
}

impl NewsLabel {
    /// Maps raw classifier labels; `LABEL_0`/`LABEL_1` are the index labels
    /// emitted by the fake-news model.
    pub fn from_model_label(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "LABEL_0" | "REAL" => Some(NewsLabel::Real),
            "LABEL_1" | "FAKE" => Some(NewsLabel::Fake),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NewsLabel::Real => "REAL",
            NewsLabel::Fake => "FAKE",
        }
    }
}

impl fmt::Display for NewsLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakeNewsVerdict {
    pub label: NewsLabel,
    pub confidence: f32,
}

impl FakeNewsVerdict {
    /// Confidence is rounded to three decimals and must lie in `[0, 1]`.
    pub fn new(label: NewsLabel, confidence: f32) -> Result<Self, String> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(format!("confidence out of range: {}", confidence));
        }
        Ok(Self {
            label,
            confidence: (confidence * 1000.0).round() / 1000.0,
        })
    }
}
