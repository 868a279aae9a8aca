//! OpenAI-compatible chat completions client using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::domain::{AppError, LlmConfig};
use crate::ports::{CompletionRequest, CompletionResponse, LlmClient};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
const DEFAULT_STATUS_MESSAGE: &str = "LLM API request failed";

/// HTTP transport for the chat completions API.
///
/// Performs a single request per call; retries live in `RetryingLlmClient`.
#[derive(Clone)]
pub struct HttpLlmClient {
    api_key: String,
    endpoint: Url,
    model: String,
    client: Client,
}

impl std::fmt::Debug for HttpLlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpLlmClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpLlmClient {
    /// Create a new HTTP client with the given API key and configuration.
    pub fn new(api_key: String, config: &LlmConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            api_key,
            endpoint: config.completions_url()?,
            model: config.model.clone(),
            client,
        })
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env(config: &LlmConfig) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AppError::EnvironmentVariableMissing(API_KEY_ENV.into()))?;

        Self::new(api_key, config)
    }

    fn send_request(&self, request: &ApiRequest<'_>) -> Result<CompletionResponse, AppError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .map_err(|e| AppError::LlmTransport(e.to_string()))?;

        let status = response.status();
        let retry_after = response.headers().get(RETRY_AFTER).and_then(parse_retry_after);
        let body_text = response.text().unwrap_or_default();

        let code = Some(status.as_u16());

        if status.is_success() {
            let api_response: ApiResponse = serde_json::from_str(&body_text).map_err(|e| {
                AppError::llm_api(format!("Failed to parse response: {}", e), code)
            })?;

            let content = api_response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .ok_or_else(|| AppError::llm_api("No completion in response", code))?;

            let usage = api_response.usage.unwrap_or_default();
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion received"
            );
            return Ok(CompletionResponse {
                content,
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
            });
        }

        let message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status.as_u16() == 429 {
                "Rate limited".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        Err(AppError::LlmApiError { message, status: code, retry_after })
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: [ApiMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ApiChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

/// `Retry-After` in delta-seconds form; HTTP dates are ignored.
fn parse_retry_after(value: &HeaderValue) -> Option<Duration> {
    value.to_str().ok()?.trim().parse::<u64>().ok().map(Duration::from_secs)
}

impl LlmClient for HttpLlmClient {
    fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AppError> {
        let api_request = ApiRequest {
            model: &self.model,
            messages: [
                ApiMessage { role: "system", content: &request.system },
                ApiMessage { role: "user", content: &request.user },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        self.send_request(&api_request)
    }
}
