mod libre_translate_client;
mod mock_translator;
mod translator_factory;

pub use libre_translate_client::LibreTranslateClient;
pub use mock_translator::MockTranslator;
pub use translator_factory::{TranslatorFactory, TranslatorFactoryError};
