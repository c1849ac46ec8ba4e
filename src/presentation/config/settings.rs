use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, File};
use serde::Deserialize;

use crate::application::ports::SummaryLength;
use crate::application::services::{
    AnalysisPolicy, ChunkFailurePolicy, DEFAULT_ENTITY_MAX_INPUT_TOKENS, InputLimit,
};
use crate::domain::Facet;
use crate::infrastructure::models::NerLabelMap;

use super::Environment;

pub const ENV_PREFIX: &str = "NEWSSENSE";
pub const ENV_SEPARATOR: &str = "__";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid environment: {0}")]
    InvalidEnvironment(String),
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("model artifact not found for {key}: {path}")]
    MissingArtifact { key: &'static str, path: PathBuf },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub extraction: ExtractionSettings,
    pub translation: TranslationSettings,
    pub models: ModelSettings,
    pub analysis: AnalysisSettings,
    pub export: ExportSettings,
    #[serde(default)]
    pub scaffold_mode: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub timeout_secs: u64,
    pub url: UrlFetchSettings,
    pub youtube: YouTubeSettings,
    pub ocr: OcrSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UrlFetchSettings {
    pub user_agent: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YouTubeSettings {
    pub base_url: String,
    pub caption_language: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrSettings {
    pub command: String,
    pub language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    #[serde(rename = "libretranslate")]
    LibreTranslate,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslationSettings {
    pub provider: TranslationProvider,
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub chunk_timeout_secs: u64,
    pub on_chunk_failure: ChunkFailurePolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    pub classifier_path: PathBuf,
    pub topic_model_path: PathBuf,
    #[serde(default)]
    pub sentiment_lexicon_path: Option<PathBuf>,
    pub inference: InferenceApiSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceApiSettings {
    pub base_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
    pub summarization_model: String,
    pub fake_news_model: String,
    pub ner_model: String,
    /// Raw NER model label → label shown in results. BIO prefixes are
    /// stripped first; unmapped labels pass through uppercased.
    #[serde(default = "default_ner_label_map")]
    pub ner_label_map: HashMap<String, String>,
    pub timeout_secs: u64,
}

fn default_ner_label_map() -> HashMap<String, String> {
    NerLabelMap::default().into_pairs()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSettings {
    pub required_facets: Vec<String>,
    pub inference_timeout_secs: u64,
    pub topic_count: usize,
    pub summary_max_input_tokens: usize,
    pub summary_min_length: usize,
    pub summary_max_length: usize,
    pub fake_news_max_chars: usize,
    #[serde(default = "default_entity_max_input_tokens")]
    pub entity_max_input_tokens: usize,
}

fn default_entity_max_input_tokens() -> usize {
    DEFAULT_ENTITY_MAX_INPUT_TOKENS
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportSettings {
    pub output_dir: PathBuf,
    pub default_filename: String,
    pub report_title: String,
}

impl Settings {
    /// Layers `appsettings.toml`, `appsettings.{env}.toml` and
    /// `NEWSSENSE__SECTION__KEY` variables, then validates the result.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env().map_err(SettingsError::InvalidEnvironment)?;
        Self::load_for(environment)
    }

    pub fn load_for(environment: Environment) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .add_source(File::with_name("appsettings").required(false))
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = configuration.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects nonsensical values. Model artifacts must exist unless the
    /// service runs in scaffold mode.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.required_facets()?;

        if self.analysis.summary_min_length > self.analysis.summary_max_length {
            return Err(SettingsError::Invalid {
                key: "analysis.summary_min_length",
                reason: "must not exceed summary_max_length".to_string(),
            });
        }
        if self.analysis.topic_count == 0 {
            return Err(SettingsError::Invalid {
                key: "analysis.topic_count",
                reason: "must be at least 1".to_string(),
            });
        }
        for (key, secs) in [
            ("extraction.timeout_secs", self.extraction.timeout_secs),
            ("translation.chunk_timeout_secs", self.translation.chunk_timeout_secs),
            ("analysis.inference_timeout_secs", self.analysis.inference_timeout_secs),
        ] {
            if secs == 0 {
                return Err(SettingsError::Invalid {
                    key,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        if self.scaffold_mode {
            return Ok(());
        }

        let artifacts = [
            ("models.classifier_path", Some(&self.models.classifier_path)),
            ("models.topic_model_path", Some(&self.models.topic_model_path)),
            (
                "models.sentiment_lexicon_path",
                self.models.sentiment_lexicon_path.as_ref(),
            ),
        ];
        for (key, path) in artifacts {
            if let Some(path) = path.filter(|p| !p.is_file()) {
                return Err(SettingsError::MissingArtifact {
                    key,
                    path: path.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn required_facets(&self) -> Result<BTreeSet<Facet>, SettingsError> {
        self.analysis
            .required_facets
            .iter()
            .map(|name| name.parse::<Facet>())
            .collect::<Result<_, _>>()
            .map_err(|reason| SettingsError::Invalid {
                key: "analysis.required_facets",
                reason,
            })
    }

    pub fn analysis_policy(&self) -> Result<AnalysisPolicy, SettingsError> {
        Ok(AnalysisPolicy {
            required_facets: self.required_facets()?,
            chunk_failure_policy: self.translation.on_chunk_failure,
            extraction_timeout: Duration::from_secs(self.extraction.timeout_secs),
            translation_chunk_timeout: Duration::from_secs(self.translation.chunk_timeout_secs),
            inference_timeout: Duration::from_secs(self.analysis.inference_timeout_secs),
            topic_count: self.analysis.topic_count,
            summary_length: SummaryLength {
                min_length: self.analysis.summary_min_length,
                max_length: self.analysis.summary_max_length,
            },
            summary_input_limit: InputLimit::Tokens(self.analysis.summary_max_input_tokens),
            fake_news_input_limit: InputLimit::Characters(self.analysis.fake_news_max_chars),
            entity_input_limit: InputLimit::Tokens(self.analysis.entity_max_input_tokens),
            default_report_stem: self.export.default_filename.clone(),
        })
    }
}
