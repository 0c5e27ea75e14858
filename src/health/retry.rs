// src/health/retry.rs

use crate::config::RetryConfig;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Re-runs a failed request according to the configured policy. The
/// default policy is a single attempt, so out of the box this is a plain
/// passthrough.
#[derive(Debug, Clone)]
pub struct RetryStrategy {
    config: RetryConfig,
}

impl RetryStrategy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub async fn execute<F, Fut, T, E>(&self, mut f: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        for attempt in 1..self.config.max_attempts {
            match f().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    let delay = self.backoff_for(attempt);
                    debug!(
                        "Attempt {}/{} failed: {}. Next try in {:?}",
                        attempt, self.config.max_attempts, error, delay
                    );
                    sleep(delay).await;
                }
            }
        }

        // Final (or only) attempt; its error goes to the caller as-is.
        let result = f().await;
        if self.config.max_attempts > 1 {
            if let Err(error) = &result {
                warn!(
                    "Giving up after {} attempts: {}",
                    self.config.max_attempts, error
                );
            }
        }
        result
    }

    /// Delay before the next attempt: doubles each time, with up to 25%
    /// jitter, and never exceeds `backoff_max_ms` even after jitter.
    fn backoff_for(&self, attempt: u32) -> Duration {
        let doubled = self
            .config
            .backoff_base_ms
            .saturating_mul(2u64.saturating_pow(attempt - 1));
        let jitter = (doubled as f64 * rand::random::<f64>() * 0.25) as u64;

        Duration::from_millis(
            doubled
                .saturating_add(jitter)
                .min(self.config.backoff_max_ms),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn policy(max_attempts: u32) -> RetryStrategy {
        RetryStrategy::new(RetryConfig {
            max_attempts,
            backoff_base_ms: 5,
            backoff_max_ms: 20,
        })
    }

    #[tokio::test]
    async fn retries_until_an_attempt_succeeds() {
        let strategy = policy(3);
        let calls = AtomicU32::new(0);

        let result = strategy
            .execute(|| async {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err("connection reset")
                } else {
                    Ok("pong")
                }
            })
            .await;

        assert_eq!(result.unwrap(), "pong");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn default_policy_runs_exactly_once() {
        let strategy = RetryStrategy::new(RetryConfig::default());
        let calls = AtomicU32::new(0);

        let result: Result<(), &str> = strategy
            .execute(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("connection reset")
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausted_attempts_return_the_last_error() {
        let strategy = policy(2);
        let calls = AtomicU32::new(0);

        let result: Result<(), String> = strategy
            .execute(|| async {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                Err(format!("failure {}", n))
            })
            .await;

        assert_eq!(result.unwrap_err(), "failure 2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn jittered_backoff_never_exceeds_the_configured_max() {
        let strategy = policy(10);

        for _ in 0..50 {
            for attempt in 1..10 {
                assert!(strategy.backoff_for(attempt) <= Duration::from_millis(20));
            }
        }
    }
}
