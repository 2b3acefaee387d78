//! Sequential retry with linear backoff

use super::error::ApiError;
use std::future::Future;
use std::time::Duration;

/// Default number of attempts per call
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Default backoff unit; attempt `n` is followed by `n` units of delay
pub const DEFAULT_BACKOFF_STEP: Duration = Duration::from_millis(1000);

/// Retry settings for one kind of call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_step: DEFAULT_BACKOFF_STEP,
        }
    }
}

/// Last failure of a retried operation
#[derive(Debug)]
pub struct Exhausted {
    pub attempts: u32,
    pub last: ApiError,
}

impl RetryPolicy {
    /// Delay to wait after failed attempt number `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_step.saturating_mul(attempt)
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or
    /// the attempts run out. `op` receives the 1-based attempt number.
    ///
    /// Attempts never overlap: the next one starts only after the previous
    /// failure and its backoff delay. No delay follows the final attempt.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut op: F) -> Result<T, Exhausted>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op(attempt).await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!("{operation} succeeded on attempt {attempt}");
                    }
                    return Ok(value);
                }
                Err(err) if attempt >= max_attempts || !err.is_retryable() => {
                    tracing::error!("{operation} failed after {attempt} attempt(s): {err}");
                    return Err(Exhausted {
                        attempts: attempt,
                        last: err,
                    });
                }
                Err(err) => {
                    let delay = self.delay_after(attempt);
                    tracing::warn!(
                        "{operation} attempt {attempt}/{max_attempts} failed: {err}; retrying in {delay:?}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn instant_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            backoff_step: Duration::ZERO,
        }
    }

    #[test]
    fn test_linear_backoff() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_after(2), Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_succeeds_on_third_attempt() {
        let calls = AtomicU32::new(0);
        let result = instant_policy()
            .run("test op", |attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 3 {
                        Err(ApiError::Network("connection reset".into()))
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = instant_policy()
            .run("test op", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(ApiError::Http { status: 503 }) }
            })
            .await;

        let exhausted = result.unwrap_err();
        assert_eq!(exhausted.attempts, 3);
        assert!(matches!(exhausted.last, ApiError::Http { status: 503 }));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_error_stops_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = instant_policy()
            .run("test op", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(ApiError::NotConfigured) }
            })
            .await;

        assert_eq!(result.unwrap_err().attempts, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_attempts_still_tries_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            backoff_step: Duration::ZERO,
        };
        let result =
            tokio_test::block_on(policy.run("test op", |_| async { Ok::<_, ApiError>(7) }));
        assert_eq!(tokio_test::assert_ok!(result), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_between_attempts_but_not_after_last() {
        let started = tokio::time::Instant::now();
        let result: Result<(), _> = RetryPolicy::default()
            .run("test op", |_| async { Err(ApiError::Timeout(Duration::ZERO)) })
            .await;

        tokio_test::assert_err!(result);
        // 1s after the first failure, 2s after the second, none after the third
        assert_eq!(started.elapsed(), Duration::from_millis(3000));
    }
}
