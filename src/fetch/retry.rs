//! Fixed-backoff retry policy for primary search fetches

use crate::config::HttpConfig;
use crate::SiftError;
use backoff::backoff::{Backoff, Constant};
use std::future::Future;
use std::time::Duration;

/// Bounded retry with a fixed wait between attempts and no jitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included
    pub max_attempts: u32,

    /// Pause between two consecutive attempts
    pub wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            wait: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, wait: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            wait,
        }
    }

    pub fn from_config(config: &HttpConfig) -> Self {
        Self::new(
            config.retry_attempts,
            Duration::from_millis(config.retry_wait_ms),
        )
    }

    /// Interval source for the waits between attempts
    fn intervals(&self) -> Constant {
        Constant::new(self.wait)
    }

    /// Runs `operation` until it succeeds or the attempts are used up
    ///
    /// # Arguments
    ///
    /// * `operation` - Called with the 1-based attempt number
    ///
    /// # Returns
    ///
    /// * `Ok(T)` - The first successful attempt's value
    /// * `Err(SiftError)` - The error of the last attempt when every attempt fails
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, SiftError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, SiftError>>,
    {
        let mut attempt = 1;
        let mut intervals = self.intervals();

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= self.max_attempts => {
                    tracing::warn!("Giving up after {} attempts: {}", attempt, e);
                    return Err(e);
                }
                Err(e) => match intervals.next_backoff() {
                    Some(wait) => {
                        tracing::debug!(
                            "Attempt {}/{} failed, retrying in {:?}: {}",
                            attempt,
                            self.max_attempts,
                            wait,
                            e
                        );
                        tokio::time::sleep(wait).await;
                        attempt += 1;
                    }
                    None => return Err(e),
                },
            }
        }
    }
}
