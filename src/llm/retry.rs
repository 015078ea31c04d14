//! Retry with exponential backoff for chat-completion calls.

use std::time::Duration;

use tracing::warn;

use super::client::LlmFuture;
use super::error::LlmResult;
use crate::config::LlmConfig;

/// Upper bound on a single backoff sleep.
const MAX_DELAY: Duration = Duration::from_secs(10);

/// Bounded retry policy shared by classification and reply generation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy with `max_retries` extra attempts after the first.
    #[must_use]
    pub const fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Policy derived from the model settings.
    #[must_use]
    pub const fn from_config(config: &LlmConfig) -> Self {
        Self::new(
            config.max_retries,
            Duration::from_millis(config.retry_delay_ms),
        )
    }

    /// Sleep before retry number `attempt` (zero-based), doubling each time.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor).min(MAX_DELAY)
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// retry budget is spent.
    ///
    /// # Errors
    /// Returns the last error produced by `op`.
    pub async fn run<'a, T, F>(&self, label: &str, mut op: F) -> LlmResult<T>
    where
        F: FnMut() -> LlmFuture<'a, LlmResult<T>>,
    {
        let mut attempt = 0_u32;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        "{label} failed (attempt {}/{}): {err}; retrying in {delay:?}",
                        attempt + 1,
                        self.max_retries + 1
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::error::LlmError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn unavailable() -> LlmError {
        LlmError::HttpStatus {
            status: 503,
            body: String::new(),
        }
    }

    #[test]
    fn test_delay_doubles_and_caps() {
        let policy = RetryPolicy::new(5, Duration::from_millis(100));
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(800));
        assert_eq!(policy.delay_for(20), MAX_DELAY);
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let calls = AtomicU32::new(0);

        let result = policy
            .run("test", || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Box::pin(async move {
                    if n < 2 { Err(unavailable()) } else { Ok(n) }
                })
            })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_budget() {
        let policy = RetryPolicy::new(1, Duration::from_millis(1));
        let calls = AtomicU32::new(0);

        let result: LlmResult<()> = policy
            .run("test", || {
                calls.fetch_add(1, Ordering::SeqCst);
                Box::pin(async { Err(unavailable()) })
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_retryable_fails_fast() {
        let policy = RetryPolicy::new(4, Duration::from_millis(1));
        let calls = AtomicU32::new(0);

        let result: LlmResult<()> = policy
            .run("test", || {
                calls.fetch_add(1, Ordering::SeqCst);
                Box::pin(async { Err(LlmError::EmptyResponse) })
            })
            .await;

        assert!(matches!(result, Err(LlmError::EmptyResponse)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
