//! LLM client port definition.

use crate::domain::AppError;

/// Request for a single chat completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System message.
    pub system: String,
    /// User message.
    pub user: String,
    /// Completion token budget.
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Model answer and token accounting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionResponse {
    pub content: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Port for LLM completion calls.
pub trait LlmClient {
    fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AppError>;
}

impl<T: LlmClient + ?Sized> LlmClient for Box<T> {
    fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AppError> {
        (**self).complete(request)
    }
}

/// Client used when no model calls are allowed (prompt-only runs).
#[derive(Debug, Clone, Default)]
pub struct OfflineLlmClient;

impl LlmClient for OfflineLlmClient {
    fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, AppError> {
        Err(AppError::llm_api("LLM calls are disabled in prompt-only mode", None))
    }
}
