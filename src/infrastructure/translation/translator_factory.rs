use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{Translator, TranslatorError};
use crate::presentation::config::{TranslationProvider, TranslationSettings};

use super::{LibreTranslateClient, MockTranslator};

#[derive(Debug, thiserror::Error)]
pub enum TranslatorFactoryError {
    #[error("base_url is required for the LibreTranslate provider")]
    MissingBaseUrl,
    #[error("translator initialization failed: {0}")]
    InitializationFailed(#[from] TranslatorError),
}

pub struct TranslatorFactory;

impl TranslatorFactory {
    pub fn create(
        settings: &TranslationSettings,
        scaffold_mode: bool,
    ) -> Result<Arc<dyn Translator>, TranslatorFactoryError> {
        if scaffold_mode || settings.provider == TranslationProvider::Mock {
            tracing::info!("Using mock translator");
            return Ok(Arc::new(MockTranslator::new()));
        }

        if settings.base_url.trim().is_empty() {
            return Err(TranslatorFactoryError::MissingBaseUrl);
        }

        tracing::info!(base_url = %settings.base_url, "Using LibreTranslate translator");
        Ok(Arc::new(LibreTranslateClient::new(
            &settings.base_url,
            settings.api_key.clone(),
            Duration::from_secs(settings.chunk_timeout_secs),
        )?))
    }
}
