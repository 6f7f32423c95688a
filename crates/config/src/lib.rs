//! Configuration loading, validation, and management for Studyhall.
//!
//! Loads configuration from `~/.studyhall/config.toml` with environment
//! variable overrides. Validates all settings at startup. Credentials must be
//! present before any interaction begins; commands refuse to proceed without
//! them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which of the two model tiers to use for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    /// The default, inexpensive model.
    Standard,
    /// The larger model, opted into per command.
    Advanced,
}

/// The root configuration structure.
///
/// Maps directly to `~/.studyhall/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// LLM API key. Required before any chat or embedding call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Weather API key. Required for the wardrobe advisor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// The standard-tier model
    #[serde(default = "default_standard_model")]
    pub standard_model: String,

    /// The advanced-tier model
    #[serde(default = "default_advanced_model")]
    pub advanced_model: String,

    /// Default temperature
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Default max tokens per LLM response
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,

    /// Chat session configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Weather configuration
    #[serde(default)]
    pub weather: WeatherConfig,
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_standard_model() -> String {
    "gpt-4o-mini".into()
}
fn default_advanced_model() -> String {
    "gpt-4o".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    4096
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("weather_api_key", &redact(&self.weather_api_key))
            .field("api_url", &self.api_url)
            .field("standard_model", &self.standard_model)
            .field("advanced_model", &self.advanced_model)
            .field("default_temperature", &self.default_temperature)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("chat", &self.chat)
            .field("retrieval", &self.retrieval)
            .field("weather", &self.weather)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Maximum retained messages in an interactive transcript.
    /// Oldest entries are dropped first once the cap is exceeded.
    #[serde(default = "default_buffer_cap")]
    pub buffer_cap: usize,
}

fn default_buffer_cap() -> usize {
    30
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            buffer_cap: default_buffer_cap(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// The embedding model used for both indexing and queries.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Top-k for the standalone retrieval search.
    #[serde(default = "default_search_top_k")]
    pub search_top_k: usize,

    /// Top-k for documents spliced into the chat prompt.
    #[serde(default = "default_chat_top_k")]
    pub chat_top_k: usize,

    /// Directory of plain-text source documents to index.
    #[serde(default = "default_corpus_dir")]
    pub corpus_dir: String,

    /// Path of the persistent document collection (JSONL).
    /// Empty = `~/.studyhall/library/documents.jsonl`.
    #[serde(default)]
    pub store_path: String,
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".into()
}
fn default_search_top_k() -> usize {
    3
}
fn default_chat_top_k() -> usize {
    2
}
fn default_corpus_dir() -> String {
    "corpus".into()
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            embedding_model: default_embedding_model(),
            search_top_k: default_search_top_k(),
            chat_top_k: default_chat_top_k(),
            corpus_dir: default_corpus_dir(),
            store_path: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the weather endpoint.
    #[serde(default = "default_weather_api_url")]
    pub api_url: String,

    /// City used when the user doesn't supply one.
    #[serde(default = "default_city")]
    pub default_city: String,
}

fn default_weather_api_url() -> String {
    "https://api.openweathermap.org/data/2.5".into()
}
fn default_city() -> String {
    "Syracuse, NY".into()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_url: default_weather_api_url(),
            default_city: default_city(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.studyhall/config.toml).
    ///
    /// Also checks environment variables for API keys:
    /// - `STUDYHALL_API_KEY` (highest priority)
    /// - `OPENAI_API_KEY`
    /// - `OPENWEATHER_API_KEY` (weather)
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = Self::config_dir();
        let config_path = config_dir.join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        // Environment variable overrides (highest priority)
        if config.api_key.is_none() {
            config.api_key = std::env::var("STUDYHALL_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        if config.weather_api_key.is_none() {
            config.weather_api_key = std::env::var("OPENWEATHER_API_KEY").ok();
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".studyhall")
    }

    /// Get the document library directory path.
    pub fn library_dir() -> PathBuf {
        Self::config_dir().join("library")
    }

    /// Resolve the persistent document collection path.
    pub fn store_path(&self) -> PathBuf {
        if self.retrieval.store_path.is_empty() {
            Self::library_dir().join("documents.jsonl")
        } else {
            PathBuf::from(&self.retrieval.store_path)
        }
    }

    /// Resolve a model tier to a concrete model name.
    pub fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Standard => &self.standard_model,
            ModelTier::Advanced => &self.advanced_model,
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_temperature < 0.0 || self.default_temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "default_temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.chat.buffer_cap == 0 {
            return Err(ConfigError::ValidationError(
                "chat.buffer_cap must be at least 1".into(),
            ));
        }

        if self.retrieval.search_top_k == 0 || self.retrieval.chat_top_k == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval top_k values must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Check if an LLM API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Check if a weather API key is available.
    pub fn has_weather_api_key(&self) -> bool {
        self.weather_api_key.is_some()
    }

    /// Generate a default config TOML string (for `onboard`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            weather_api_key: None,
            api_url: default_api_url(),
            standard_model: default_standard_model(),
            advanced_model: default_advanced_model(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
            chat: ChatConfig::default(),
            retrieval: RetrievalConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.standard_model, "gpt-4o-mini");
        assert_eq!(config.advanced_model, "gpt-4o");
        assert_eq!(config.chat.buffer_cap, 30);
        assert_eq!(config.retrieval.search_top_k, 3);
        assert_eq!(config.retrieval.chat_top_k, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.standard_model, config.standard_model);
        assert_eq!(parsed.chat.buffer_cap, config.chat.buffer_cap);
        assert_eq!(parsed.weather.default_city, "Syracuse, NY");
    }

    #[test]
    fn model_tier_resolution() {
        let config = AppConfig::default();
        assert_eq!(config.model_for(ModelTier::Standard), "gpt-4o-mini");
        assert_eq!(config.model_for(ModelTier::Advanced), "gpt-4o");
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            default_temperature: 5.0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_buffer_cap_rejected() {
        let config = AppConfig {
            chat: ChatConfig { buffer_cap: 0 },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        let config = result.unwrap();
        assert_eq!(config.api_url, "https://api.openai.com/v1");
    }

    #[test]
    fn parses_partial_config() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "api_key = \"sk-test\"\n\n[chat]\nbuffer_cap = 4").unwrap();

        let config = AppConfig::load_from(tmp.path()).unwrap();
        assert!(config.has_api_key());
        assert_eq!(config.chat.buffer_cap, 4);
        // Untouched sections keep defaults
        assert_eq!(config.retrieval.embedding_model, "text-embedding-3-small");
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("gpt-4o-mini"));
        assert!(toml_str.contains("openweathermap"));
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = AppConfig {
            api_key: Some("sk-very-secret".into()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
