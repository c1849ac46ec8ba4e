use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{SourceExtractor, SourceExtractorError};
use crate::domain::SourceModality;
use crate::presentation::config::ExtractionSettings;

use super::{
    CompositeSourceExtractor, MockSourceExtractor, PdfAdapter, PlainTextAdapter,
    TesseractOcrAdapter, UrlArticleAdapter, YouTubeTranscriptAdapter,
};

#[derive(Debug, thiserror::Error)]
pub enum ExtractorFactoryError {
    #[error("extractor initialization failed: {0}")]
    InitializationFailed(#[from] SourceExtractorError),
}

pub struct ExtractorFactory;

impl ExtractorFactory {
    pub fn create(
        settings: &ExtractionSettings,
        scaffold_mode: bool,
    ) -> Result<Arc<dyn SourceExtractor>, ExtractorFactoryError> {
        if scaffold_mode {
            tracing::info!("Scaffold mode: using mock source extractor");
            return Ok(Arc::new(MockSourceExtractor));
        }

        let url = UrlArticleAdapter::new(
            &settings.url.user_agent,
            Duration::from_secs(settings.url.timeout_secs),
        )?;
        let youtube = YouTubeTranscriptAdapter::new(
            &settings.youtube.base_url,
            &settings.youtube.caption_language,
            Duration::from_secs(settings.youtube.timeout_secs),
        )?;
        let ocr = TesseractOcrAdapter::new(&settings.ocr.command, &settings.ocr.language);

        tracing::info!(
            ocr_command = %settings.ocr.command,
            transcript_base_url = %settings.youtube.base_url,
            "Source extractors ready"
        );

        let adapters: Vec<(SourceModality, Arc<dyn SourceExtractor>)> = vec![
            (SourceModality::Text, Arc::new(PlainTextAdapter)),
            (SourceModality::Pdf, Arc::new(PdfAdapter::new())),
            (SourceModality::Url, Arc::new(url)),
            (SourceModality::Transcript, Arc::new(youtube)),
            (SourceModality::Image, Arc::new(ocr)),
        ];

        Ok(Arc::new(CompositeSourceExtractor::new(adapters)))
    }
}
