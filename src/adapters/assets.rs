//! Prompt and report templates embedded in the binary.

use include_dir::{Dir, include_dir};
use serde::Deserialize;

use crate::domain::AppError;

static ASSETS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets");

const TEST_GENERATION_PROMPT: &str = "prompts/test_generation.toml";
const REPORT_TEMPLATE: &str = "report/report.html";

/// Prompt template pair before rendering.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptTemplate {
    pub system: String,
    pub user: String,
}

pub fn test_generation_prompt() -> Result<PromptTemplate, AppError> {
    let content = asset_content(TEST_GENERATION_PROMPT)?;
    Ok(toml::from_str(content)?)
}

pub fn report_template() -> Result<&'static str, AppError> {
    asset_content(REPORT_TEMPLATE)
}

fn asset_content(path: &str) -> Result<&'static str, AppError> {
    let file = ASSETS_DIR
        .get_file(path)
        .ok_or_else(|| AppError::Internal { message: format!("Missing embedded asset {}", path) })?;
    file.contents_utf8()
        .ok_or_else(|| AppError::Internal { message: format!("Embedded asset {} is not UTF-8", path) })
}
