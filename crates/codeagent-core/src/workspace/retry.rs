//! Retry policy.

use std::{future::Future, time::Duration};

use tracing::warn;

/// Retry policy with linear backoff: waits `backoff * attempt` between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Base backoff.
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Build a policy allowing `extra_attempts` after the first one.
    pub fn new(extra_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: extra_attempts + 1,
            backoff,
        }
    }

    /// Build a policy which never retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Delay before the next attempt, after `attempt` failures.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff * attempt
    }

    /// Run an operation until it succeeds or attempts run out, returning the last error.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < max_attempts => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt,
                        max_attempts,
                        delay_secs = delay.as_secs_f32(),
                        error = %e,
                        "Attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
