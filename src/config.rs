//! Configuration module for Arbiter Core.
//!
//! Loads configuration from YAML files and environment variables.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub moderation: ModerationConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

/// Moderation pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ModerationConfig {
    /// Confidence below which a "rejected" verdict is downgraded to
    /// "flagged" for human review.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
}

/// AI model configuration for the bundled OpenRouter client.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// API key for OpenRouter.
    #[serde(default)]
    pub api_key: String,
    /// Chat-completion model used for moderation verdicts.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_confidence_threshold() -> f64 {
    0.7
}

fn default_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (ARBITER_*)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("ARBITER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
