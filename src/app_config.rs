use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    pub source_language: String,

    /// Target language code (ISO)
    pub target_language: String,

    /// What the document is about, fed to the translator as domain context.
    /// Left empty, the pipeline infers a topic from sampled excerpts.
    #[serde(default)]
    pub domain_context: String,

    /// Optional word-count ceiling for a job. None means unrestricted.
    #[serde(default)]
    pub quota_words: Option<usize>,

    /// Translation config
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: OpenAI
    #[default]
    OpenAI,
    // @provider: LM Studio (OpenAI-compatible local server)
    LMStudio,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::LMStudio => "LM Studio",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::LMStudio => "lmstudio".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "lmstudio" => Ok(Self::LMStudio),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::OpenAI => Self {
                provider_type: "openai".to_string(),
                model: default_openai_model(),
                api_key: String::new(),
                endpoint: String::new(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::LMStudio => Self {
                provider_type: "lmstudio".to_string(),
                model: default_lmstudio_model(),
                api_key: String::new(),
                endpoint: default_lmstudio_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default = "default_available_providers")]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: default_available_providers(),
            common: TranslationCommonConfig::default(),
        }
    }
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Temperature parameter for text generation (0.0 to 1.0)
    /// Lower values make output more deterministic, higher values more creative
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Politeness pause configuration applied between external calls
    #[serde(default)]
    pub cooldown: CooldownConfig,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            cooldown: CooldownConfig::default(),
        }
    }
}

/// Randomized pause applied after external calls
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CooldownConfig {
    /// Probability that a given call is followed by a pause
    #[serde(default = "default_cooldown_probability")]
    pub probability: f64,

    /// Upper bound of the pause duration in milliseconds
    #[serde(default = "default_cooldown_max_pause_ms")]
    pub max_pause_ms: u64,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            probability: default_cooldown_probability(),
            max_pause_ms: default_cooldown_max_pause_ms(),
        }
    }
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warn level
    Warn,
    /// Info level
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl TranslationConfig {
    /// Get the provider entry matching the active provider
    pub fn active_provider_config(&self) -> Option<&ProviderConfig> {
        let wanted = self.provider.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == wanted)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        self.active_provider_config()
            .map(|p| p.model.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(default_openai_model)
    }

    /// Get the API key for the active provider, falling back to the
    /// OPENAI_API_KEY environment variable
    pub fn get_api_key(&self) -> String {
        let configured = self
            .active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default();

        if !configured.is_empty() {
            return configured;
        }

        std::env::var("OPENAI_API_KEY").unwrap_or_default()
    }

    /// Get the endpoint for the active provider (empty means provider default)
    pub fn get_endpoint(&self) -> String {
        self.active_provider_config()
            .map(|p| p.endpoint.clone())
            .unwrap_or_default()
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.active_provider_config()
            .map(|p| p.timeout_secs)
            .unwrap_or_else(default_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: "es".to_string(),
            target_language: "en".to_string(),
            domain_context: String::new(),
            quota_words: None,
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_language_code(&self.source_language)
            .map_err(|e| anyhow!("Invalid source language: {}", e))?;

        language_utils::validate_language_code(&self.target_language)
            .map_err(|e| anyhow!("Invalid target language: {}", e))?;

        if language_utils::language_codes_match(&self.source_language, &self.target_language) {
            return Err(anyhow!(
                "Source and target language are the same: {}",
                self.source_language
            ));
        }

        let provider_config = self.translation.active_provider_config().ok_or_else(|| {
            anyhow!(
                "No provider entry configured for '{}'",
                self.translation.provider
            )
        })?;

        if !provider_config.endpoint.is_empty() {
            url::Url::parse(&provider_config.endpoint).map_err(|e| {
                anyhow!(
                    "Invalid endpoint '{}' for provider '{}': {}",
                    provider_config.endpoint,
                    provider_config.provider_type,
                    e
                )
            })?;
        }

        let cooldown = &self.translation.common.cooldown;
        if !(0.0..=1.0).contains(&cooldown.probability) {
            return Err(anyhow!(
                "Cooldown probability must be within [0, 1], got {}",
                cooldown.probability
            ));
        }

        Ok(())
    }
}

fn default_available_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(TranslationProvider::OpenAI),
        ProviderConfig::new(TranslationProvider::LMStudio),
    ]
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_lmstudio_model() -> String {
    "qwen2.5-7b-instruct".to_string()
}

fn default_lmstudio_endpoint() -> String {
    "http://localhost:1234/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_temperature() -> f32 {
    0.3
}

fn default_cooldown_probability() -> f64 {
    0.5
}

fn default_cooldown_max_pause_ms() -> u64 {
    2000
}
