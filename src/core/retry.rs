use crate::config::Config;
use crate::errors::SubmitError;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Bounded exponential backoff for one remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

/// Result of a retried call plus how many attempts it took.
#[derive(Debug)]
pub struct RetryOutcome<T> {
    pub result: Result<T, SubmitError>,
    pub attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            ..Self::default()
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.max_attempts, Duration::from_millis(cfg.retry_delay_ms))
    }

    /// Single attempt, no waiting.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Delay before retry number `retry` (0-based): initial * 2^retry, capped.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }

    /// Run `operation` until it succeeds, fails permanently, or attempts run out.
    pub fn run<T, F>(&self, mut operation: F) -> RetryOutcome<T>
    where
        F: FnMut(u32) -> Result<T, SubmitError>,
    {
        let mut attempt = 1;
        loop {
            debug!(attempt, max_attempts = self.max_attempts, "executing remote call");

            match operation(attempt) {
                Ok(value) => {
                    return RetryOutcome {
                        result: Ok(value),
                        attempts: attempt,
                    };
                }
                Err(err) if err.is_retryable() && attempt < self.max_attempts => {
                    let delay = self.delay_for(attempt - 1);
                    warn!(attempt, error = %err, delay_ms = delay.as_millis() as u64, "retrying");
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                    attempt += 1;
                }
                Err(err) => {
                    return RetryOutcome {
                        result: Err(err),
                        attempts: attempt,
                    };
                }
            }
        }
    }
}
