//! Retries for transient completion failures.
//!
//! A completion is retried when the API could not be reached, timed out, was
//! rate limited, or failed server-side. Anything else, including a malformed
//! answer from a successful response, is returned on the first failure.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::thread;
use std::time::Duration;

use tracing::warn;

use crate::domain::{AppError, LlmConfig};
use crate::ports::{CompletionRequest, CompletionResponse, LlmClient};

/// Upper bound on any single wait, including server-requested ones.
const MAX_DELAY: Duration = Duration::from_secs(30);

/// How many attempts a completion gets and how long to wait between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &LlmConfig) -> Self {
        let base_delay = Duration::from_millis(config.retry_delay_ms.max(1));
        Self {
            max_attempts: config.max_retries.max(1),
            base_delay,
            max_delay: MAX_DELAY.max(base_delay),
        }
    }

    /// Wait before the attempt following `attempt` (1-based), or `None` when
    /// `error` is final.
    fn next_delay(&self, attempt: u32, error: &AppError) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        match error {
            AppError::LlmTransport(_) => Some(self.backoff(attempt)),
            AppError::LlmApiError { status: Some(status), retry_after, .. }
                if is_transient_status(*status) =>
            {
                let wait = retry_after.unwrap_or_else(|| self.backoff(attempt));
                Some(wait.min(self.max_delay))
            }
            _ => None,
        }
    }

    /// Doubling delay from `base_delay`, plus up to a quarter of random jitter.
    fn backoff(&self, attempt: u32) -> Duration {
        let doubled = self.base_delay.saturating_mul(1 << attempt.saturating_sub(1).min(16));
        let delay = doubled.min(self.max_delay);
        let jitter_ms = (delay.as_millis() / 4) as u64;
        let jitter =
            if jitter_ms == 0 { Duration::ZERO } else { Duration::from_millis(random() % jitter_ms) };
        (delay + jitter).min(self.max_delay)
    }
}

fn is_transient_status(status: u16) -> bool {
    matches!(status, 408 | 429) || (500..600).contains(&status)
}

fn random() -> u64 {
    RandomState::new().build_hasher().finish()
}

/// `LlmClient` that re-sends a completion request after transient failures.
pub struct RetryingLlmClient<C> {
    inner: C,
    policy: RetryPolicy,
}

impl<C: LlmClient> RetryingLlmClient<C> {
    pub fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl<C: LlmClient> LlmClient for RetryingLlmClient<C> {
    fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AppError> {
        let mut attempt = 1;
        loop {
            let error = match self.inner.complete(request.clone()) {
                Ok(response) => return Ok(response),
                Err(error) => error,
            };
            let Some(delay) = self.policy.next_delay(attempt, &error) else {
                return Err(error);
            };

            warn!(
                attempt,
                max_attempts = self.policy.max_attempts,
                delay_ms = delay.as_millis() as u64,
                "completion failed, retrying: {}",
                error
            );
            thread::sleep(delay);
            attempt += 1;
        }
    }
}
