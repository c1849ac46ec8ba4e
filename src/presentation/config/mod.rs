mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VARIABLE, Environment};
pub use settings::{
    AnalysisSettings, ENV_PREFIX, ENV_SEPARATOR, ExportSettings, ExtractionSettings,
    InferenceApiSettings, LoggingSettings, ModelSettings, OcrSettings, ServerSettings, Settings,
    SettingsError, TranslationProvider, TranslationSettings, UrlFetchSettings, YouTubeSettings,
};
