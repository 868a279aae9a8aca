use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::{CompletionRequest, CompletionResponse, LlmClient};

/// Returns queued answers in order and records every request.
#[derive(Clone, Default)]
pub struct FakeLlmClient {
    answers: Arc<Mutex<VecDeque<String>>>,
    pub requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl FakeLlmClient {
    pub fn with_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Arc::new(Mutex::new(answers.into_iter().map(Into::into).collect())),
            ..Default::default()
        }
    }

    pub fn get_requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl LlmClient for FakeLlmClient {
    fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AppError> {
        self.requests.lock().unwrap().push(request);
        let content = self.answers.lock().unwrap().pop_front().ok_or_else(|| {
            AppError::llm_api("test: no scripted answer left", None)
        })?;
        Ok(CompletionResponse { content, prompt_tokens: 0, completion_tokens: 0 })
    }
}
