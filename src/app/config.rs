//! LLM configuration loading.

use std::fs;

use crate::domain::{AgentConfig, AppError, LlmConfig, Options};

/// Resolve the LLM configuration: config file first, CLI overrides on top.
pub fn load_llm_config(options: &Options) -> Result<LlmConfig, AppError> {
    let mut config = match &options.config_path {
        Some(path) => {
            if !path.is_file() {
                return Err(AppError::config_error(format!(
                    "Config file not found at {}",
                    path.display()
                )));
            }
            parse_config_content(&fs::read_to_string(path)?)?
        }
        None => AgentConfig::default(),
    };

    if let Some(model) = &options.model {
        config.llm.model = model.clone();
    }
    if let Some(api_base) = &options.api_base {
        config.llm.api_base = api_base.clone();
    }

    config.validate()?;
    Ok(config.llm)
}

pub fn parse_config_content(content: &str) -> Result<AgentConfig, AppError> {
    let config: AgentConfig = toml::from_str(content)?;
    Ok(config)
}
