//! Retry policy with linear backoff, jitter and an overall deadline.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, warn};

use crate::error::InferenceError;

// == Retry Config ==
/// Retry and timeout settings for upstream generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Attempts allowed after the first one
    pub max_retries: u32,
    /// Delay step; retry `n` waits `n * base_delay` plus jitter
    pub base_delay: Duration,
    /// Upper bound of the random jitter added to each delay
    pub max_jitter: Duration,
    /// Deadline for the whole call, retries and sleeps included
    pub timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
            max_jitter: Duration::from_millis(250),
            timeout: Duration::from_secs(25),
        }
    }
}

// == Retry Policy ==
/// Runs an upstream operation with retries under a hard deadline.
#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Delay before retry `retry` (1-based).
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let jitter_ms = self.config.max_jitter.as_millis() as u64;
        let jitter = rand::thread_rng().gen_range(0..=jitter_ms);
        self.config.base_delay * retry + Duration::from_millis(jitter)
    }

    /// Executes `operation` until it succeeds, fails non-retryably, or runs
    /// out of retries.
    ///
    /// The whole loop is bounded by the configured timeout. When the deadline
    /// passes, the in-flight attempt is dropped and `InferenceError::Timeout`
    /// is returned.
    pub async fn run<F, Fut, T>(&self, operation: F) -> Result<T, InferenceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, InferenceError>>,
    {
        let deadline = self.config.timeout;
        match tokio::time::timeout(deadline, self.attempt_loop(operation)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_ms = deadline.as_millis() as u64, "Generation timed out");
                Err(InferenceError::Timeout {
                    after_ms: deadline.as_millis() as u64,
                })
            }
        }
    }

    async fn attempt_loop<F, Fut, T>(&self, mut operation: F) -> Result<T, InferenceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, InferenceError>>,
    {
        let mut retry = 0;
        loop {
            match operation().await {
                Ok(value) => {
                    if retry > 0 {
                        debug!(retry, "Retry succeeded");
                    }
                    return Ok(value);
                }
                Err(error) if !error.is_retryable() || retry >= self.config.max_retries => {
                    return Err(error);
                }
                Err(error) => {
                    retry += 1;
                    let delay = self.delay_for_retry(retry);
                    warn!(
                        retry,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Retrying generation after error"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
