//! Configuration management for the TerraGuard server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides (TG__SECTION__KEY, e.g. TG__AI__MODEL)

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Text-generation backend for recommendations
    pub ai: AiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Inference API base URL
    pub endpoint: String,

    /// Model identifier
    pub model: String,

    /// Access token; without one the rule-based strategy is used
    #[serde(default)]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    pub max_new_tokens: u32,

    pub temperature: f32,
}

impl AiConfig {
    /// Token if one is configured and non-blank
    pub fn token(&self) -> Option<&str> {
        self.api_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("TG_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let mut builder = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("ai.endpoint", "https://api-inference.huggingface.co")?
            .set_default("ai.model", "mistralai/Mistral-7B-Instruct-v0.2")?
            .set_default("ai.timeout_secs", 30)?
            .set_default("ai.max_new_tokens", 800)?
            .set_default("ai.temperature", 0.7)?;

        // Conventional HuggingFace token variables
        if let Some(token) = std::env::var("HUGGINGFACE_API_TOKEN")
            .or_else(|_| std::env::var("HF_TOKEN"))
            .ok()
        {
            builder = builder.set_default("ai.api_token", token)?;
        }

        let config = builder
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (TG_ prefix)
            .add_source(
                Environment::with_prefix("TG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api-inference.huggingface.co".to_string(),
            model: "mistralai/Mistral-7B-Instruct-v0.2".to_string(),
            api_token: None,
            timeout_secs: 30,
            max_new_tokens: 800,
            temperature: 0.7,
        }
    }
}
