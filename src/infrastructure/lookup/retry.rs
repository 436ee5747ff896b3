use crate::infrastructure::geocoding::ProviderError;
use std::{future::Future, time::Duration};

/// Bounded retries with a backoff of `base_delay × attempt` between attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// A single attempt, no waiting.
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Delay after the failed `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }

    /// Runs `call` until it succeeds, fails with a non-retryable error, or the
    /// attempts run out. `operation` and `subject` only feed the logs.
    pub async fn run<T, F, Fut>(
        &self,
        operation: &str,
        subject: &str,
        mut call: F,
    ) -> Result<T, ProviderError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt = 1;
        loop {
            match call(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() => {
                    tracing::info!(operation, subject, attempt, error = %err, "terminal upstream answer");
                    return Err(err);
                }
                Err(err) if attempt >= self.max_attempts => {
                    tracing::error!(
                        operation,
                        subject,
                        attempt,
                        error = %err,
                        "upstream call failed, attempts exhausted"
                    );
                    return Err(err);
                }
                Err(err) => {
                    let delay = self.backoff(attempt);
                    tracing::warn!(
                        operation,
                        subject,
                        attempt,
                        retry_in_ms = delay.as_millis() as u64,
                        error = %err,
                        "upstream call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
