use super::SourceModality;

/// Raw user input for one ingestion, before any extractor has run.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceInput {
    Url(String),
    Pdf(Vec<u8>),
    Image(Vec<u8>),
    YouTube(String),
    Text(String),
}

impl SourceInput {
    pub fn modality(&self) -> SourceModality {
        match self {
            SourceInput::Url(_) => SourceModality::Url,
            SourceInput::Pdf(_) => SourceModality::Pdf,
            SourceInput::Image(_) => SourceModality::Image,
            SourceInput::YouTube(_) => SourceModality::Transcript,
            SourceInput::Text(_) => SourceModality::Text,
        }
    }

    pub fn size_bytes(&self) -> usize {
        match self {
            SourceInput::Url(s) | SourceInput::YouTube(s) | SourceInput::Text(s) => s.len(),
            SourceInput::Pdf(b) | SourceInput::Image(b) => b.len(),
        }
    }
}
