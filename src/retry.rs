// file: src/retry.rs
// description: retry policy with exponential backoff around single external calls
// reference: https://docs.rs/tokio/latest/tokio/time/fn.sleep.html

use crate::config::RetryConfig;
use crate::error::{ErrorKind, Result, ToolError};
use std::future::Future;
use std::time::Duration;
use tracing::{error, warn};

/// Which failure class a policy is allowed to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOn {
    /// Network unreachable, timeouts and connection failures against HTTP APIs.
    TransientNetwork,
    /// Connection and timeout failures reported by the vector store backend.
    StoreUnavailable,
}

impl RetryOn {
    pub fn matches(&self, err: &ToolError) -> bool {
        match self {
            RetryOn::TransientNetwork => err.kind() == ErrorKind::TransientNetwork,
            RetryOn::StoreUnavailable => err.kind() == ErrorKind::StoreUnavailable,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, the first call included.
    pub max_attempts: u32,
    pub multiplier: f64,
    /// Lower bound of every backoff, in `time_unit`s.
    pub min_delay: f64,
    /// Upper bound of every backoff, in `time_unit`s.
    pub max_delay: f64,
    pub time_unit: Duration,
    pub retry_on: RetryOn,
}

impl RetryPolicy {
    pub fn new(retry_on: RetryOn) -> Self {
        Self::from_config(&RetryConfig::default(), retry_on)
    }

    pub fn from_config(config: &RetryConfig, retry_on: RetryOn) -> Self {
        Self {
            max_attempts: config.max_attempts,
            multiplier: config.multiplier,
            min_delay: config.min_delay,
            max_delay: config.max_delay,
            time_unit: Duration::from_secs(1),
            retry_on,
        }
    }

    pub fn with_time_unit(mut self, time_unit: Duration) -> Self {
        self.time_unit = time_unit;
        self
    }

    /// Delay inserted before attempt `attempt` (1-based). The first attempt
    /// never waits.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt < 2 {
            return Duration::ZERO;
        }

        let exponent = (attempt - 2).min(62) as i32;
        let raw = self.multiplier * 2f64.powi(exponent);
        let units = raw.min(self.max_delay).max(self.min_delay);

        self.time_unit.mul_f64(units)
    }

    /// Backoff delays between consecutive attempts, in order.
    pub fn schedule(&self) -> Vec<Duration> {
        (2..=self.max_attempts)
            .map(|attempt| self.delay_for_attempt(attempt))
            .collect()
    }

    /// Run `call` until it succeeds, fails with an error this policy does not
    /// retry, or runs out of attempts. The last error is returned as-is.
    pub async fn run<F, Fut, T>(&self, operation: &str, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let err = match call().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !self.retry_on.matches(&err) {
                error!(
                    operation,
                    attempt,
                    error = %err,
                    "Operation failed with a non-retryable error"
                );
                return Err(err);
            }

            if attempt >= max_attempts {
                error!(
                    operation,
                    attempt,
                    max_attempts,
                    error = %err,
                    "Operation failed, retry attempts exhausted"
                );
                return Err(err);
            }

            attempt += 1;
            let backoff = self.delay_for_attempt(attempt);
            warn!(
                operation,
                attempt,
                max_attempts,
                backoff_ms = backoff.as_millis() as u64,
                error = %err,
                "Retrying operation after backoff"
            );
            tokio::time::sleep(backoff).await;
        }
    }
}
