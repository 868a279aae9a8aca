use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Library-wide error type for cover-agent operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Source file under test does not exist.
    #[error("Source file not found at {}", .0.display())]
    SourceFileNotFound(PathBuf),

    /// Test file to extend does not exist.
    #[error("Test file not found at {}", .0.display())]
    TestFileNotFound(PathBuf),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration value failed validation.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Required environment variable is not set.
    #[error("Environment variable '{0}' is not set")]
    EnvironmentVariableMissing(String),

    /// The test command exited unsuccessfully while measuring coverage.
    #[error("Test command '{command}' failed with exit code {exit_code}: {stderr}")]
    TestCommandFailed { command: String, exit_code: i32, stderr: String },

    /// The test command could not be started.
    #[error("Failed to run test command '{command}': {details}")]
    CommandSpawn { command: String, details: String },

    /// Coverage report file is missing.
    #[error("Coverage report not found at {}", .0.display())]
    CoverageReportNotFound(PathBuf),

    /// Coverage report was not rewritten by the last test run.
    #[error("Coverage report at {} was not updated by the test command", .0.display())]
    CoverageReportStale(PathBuf),

    /// Coverage report could not be parsed.
    #[error("Failed to parse coverage report {}: {details}", .path.display())]
    CoverageParse { path: PathBuf, details: String },

    /// The LLM API answered with an error or an unusable completion.
    #[error("LLM API error: {message}")]
    LlmApiError {
        message: String,
        status: Option<u16>,
        /// Server-requested wait before the next attempt (`Retry-After`).
        retry_after: Option<Duration>,
    },

    /// The LLM API could not be reached.
    #[error("LLM request failed: {0}")]
    LlmTransport(String),

    /// Prompt template failed to load or render.
    #[error("Prompt template error: {0}")]
    PromptTemplate(String),

    /// LLM answer could not be parsed.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Report rendering failed.
    #[error("Report generation failed: {0}")]
    Report(String),

    /// Embedded asset missing or malformed.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// API error without a retry hint.
    pub fn llm_api<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        AppError::LlmApiError { message: message.into(), status, retry_after: None }
    }
}
