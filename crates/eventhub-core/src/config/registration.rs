//! Registration retry configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bounds on transparent retries of transient store contention.
///
/// Only serialization failures and deadlocks are retried. Business
/// outcomes (sold out, already registered) are never retried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// Retries after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds.
    #[serde(default = "default_initial_delay")]
    pub retry_initial_delay_ms: u64,
    /// Cap on the backoff delay, in milliseconds.
    #[serde(default = "default_max_delay")]
    pub retry_max_delay_ms: u64,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_initial_delay_ms: default_initial_delay(),
            retry_max_delay_ms: default_max_delay(),
        }
    }
}

impl RegistrationConfig {
    /// Initial backoff delay.
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.retry_initial_delay_ms)
    }

    /// Maximum backoff delay.
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.retry_max_delay_ms)
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_delay() -> u64 {
    10
}

fn default_max_delay() -> u64 {
    200
}
