//! Bounded retry with exponential backoff for transient store contention.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

use eventhub_core::config::RegistrationConfig;
use eventhub_core::error::{AppError, CancelError, RegisterError};

/// Errors that can tell retryable contention apart from final outcomes.
pub trait Transient {
    /// Whether the failed operation may be retried as a whole.
    fn is_transient(&self) -> bool;
}

impl Transient for AppError {
    fn is_transient(&self) -> bool {
        AppError::is_transient(self)
    }
}

impl Transient for RegisterError {
    fn is_transient(&self) -> bool {
        RegisterError::is_transient(self)
    }
}

impl Transient for CancelError {
    fn is_transient(&self) -> bool {
        CancelError::is_transient(self)
    }
}

/// Retry policy for exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Cap on the delay between retries.
    pub max_delay: Duration,
    /// Backoff multiplier.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RegistrationConfig::default())
    }
}

impl RetryPolicy {
    /// Build the policy from the `[registration]` config section.
    pub fn from_config(config: &RegistrationConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_delay: config.initial_delay(),
            max_delay: config.max_delay(),
            multiplier: 2.0,
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (zero-based), capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.powi(i32::try_from(attempt).unwrap_or(i32::MAX));
        let delay_ms = self.initial_delay.as_millis() as f64 * factor;
        if !delay_ms.is_finite() || delay_ms >= self.max_delay.as_millis() as f64 {
            return self.max_delay;
        }
        Duration::from_millis(delay_ms as u64)
    }

    /// Run `op`, retrying it while it fails transiently and retries remain.
    ///
    /// Non-transient failures are returned on the first occurrence.
    pub async fn run<T, E, F, Fut>(&self, operation: &'static str, mut op: F) -> Result<T, E>
    where
        E: Transient + Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = self.delay_for_attempt(attempt);
                    attempt += 1;
                    warn!(
                        operation,
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Transient store failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }
}
