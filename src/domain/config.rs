//! Configuration domain models.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Configuration loaded from the optional `--config` TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// LLM API configuration.
    #[serde(default)]
    pub llm: LlmConfig,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.llm.validate()
    }
}

/// OpenAI-compatible chat completions API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// Base URL; `chat/completions` is appended.
    #[serde(default = "default_api_base")]
    pub api_base: Url,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum attempts per completion.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay between retries in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Completion token budget.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl LlmConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.model.trim().is_empty() {
            return Err(AppError::InvalidConfig("model must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        if self.max_retries == 0 {
            return Err(AppError::InvalidConfig("max_retries must be greater than 0".to_string()));
        }
        if self.retry_delay_ms == 0 {
            return Err(AppError::InvalidConfig(
                "retry_delay_ms must be greater than 0".to_string(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(AppError::InvalidConfig("max_tokens must be greater than 0".to_string()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::InvalidConfig(
                "temperature must be between 0.0 and 2.0".to_string(),
            ));
        }
        Ok(())
    }

    /// Full endpoint for chat completions.
    pub fn completions_url(&self) -> Result<Url, AppError> {
        let mut base = self.api_base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join("chat/completions")
            .map_err(|e| AppError::InvalidConfig(format!("invalid api_base: {}", e)))
    }
}

fn default_api_base() -> Url {
    Url::parse("https://api.openai.com/v1").expect("Default API base must be valid")
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_temperature() -> f32 {
    0.2
}
