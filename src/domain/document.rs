use std::fmt;
use std::str::FromStr;

use super::DocumentId;

/// Article text as extracted from one input source.
///
/// Immutable once extracted. Translation produces a new `Document` with the
/// same id whose text replaces the original.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub text: String,
    pub modality: SourceModality,
    pub language: SourceLanguage,
    pub translated: bool,
}

impl Document {
    pub fn new(text: String, modality: SourceModality, language: SourceLanguage) -> Self {
        Self {
            id: DocumentId::new(),
            text,
            modality,
            language,
            translated: false,
        }
    }

    pub fn needs_translation(&self) -> bool {
        !self.translated && self.language != SourceLanguage::English
    }

    pub fn with_translation(&self, english_text: String) -> Self {
        Self {
            id: self.id,
            text: english_text,
            modality: self.modality,
            language: self.language,
            translated: true,
        }
    }

    /// Leading slice of the text, cut on a character boundary.
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceModality {
    Url,
    Pdf,
    Image,
    Transcript,
    Text,
}

impl SourceModality {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceModality::Url => "URL",
            SourceModality::Pdf => "PDF",
            SourceModality::Image => "IMAGE",
            SourceModality::Transcript => "TRANSCRIPT",
            SourceModality::Text => "TEXT",
        }
    }
}

impl fmt::Display for SourceModality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceLanguage {
    #[default]
    English,
    Hindi,
    Telugu,
}

impl SourceLanguage {
    /// ISO 639-1 code used by translation backends.
    pub fn code(&self) -> &'static str {
        match self {
            SourceLanguage::English => "en",
            SourceLanguage::Hindi => "hi",
            SourceLanguage::Telugu => "te",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLanguage::English => "English",
            SourceLanguage::Hindi => "Hindi",
            SourceLanguage::Telugu => "Telugu",
        }
    }
}

impl FromStr for SourceLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(SourceLanguage::English),
            "hindi" | "hi" => Ok(SourceLanguage::Hindi),
            "telugu" | "te" => Ok(SourceLanguage::Telugu),
            other => Err(format!(
                "Invalid language: {}. Expected: English, Hindi or Telugu",
                other
            )),
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
