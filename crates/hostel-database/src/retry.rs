//! Bounded retry with linear backoff for transient store failures.
//!
//! Only connectivity failures are retried. Query errors, constraint
//! violations, and decode errors surface immediately.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use hostel_core::config::DatabaseConfig;

/// Retry policy applied to account store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Always at least 1.
    attempts: u32,
    /// Base delay; the wait before attempt `n + 1` is `base * n`.
    backoff: Duration,
}

impl RetryPolicy {
    /// Create a policy with the given attempt count and base backoff.
    pub fn new(attempts: u32, backoff: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            backoff,
        }
    }

    /// Build the policy from database configuration.
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self::new(
            config.retry_attempts,
            Duration::from_millis(config.retry_backoff_ms),
        )
    }

    /// Total attempts made before giving up.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Run `op`, retrying while it fails with a transient error.
    pub async fn run<T, F, Fut>(&self, operation: &'static str, mut op: F) -> Result<T, sqlx::Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.attempts && is_transient(&e) => {
                    debug!(
                        operation,
                        attempt,
                        max_attempts = self.attempts,
                        error = %e,
                        "Transient database error, retrying"
                    );
                    tokio::time::sleep(self.backoff * attempt).await;
                    attempt += 1;
                }
                Err(e) => {
                    if is_transient(&e) {
                        warn!(
                            operation,
                            attempts = attempt,
                            error = %e,
                            "Database still unavailable after retries"
                        );
                    }
                    return Err(e);
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&DatabaseConfig::default())
    }
}

/// Whether an error is a connectivity failure worth retrying.
///
/// A closed pool is permanent and fails immediately.
pub fn is_transient(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::PoolTimedOut | sqlx::Error::Io(_))
}
