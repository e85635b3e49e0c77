//! Exponential-backoff retry wrapper for outbound remote calls.

use std::future::Future;
use std::time::Duration;

use crate::config::RetryConfig;

/// Retry policy applied to every outbound capability call.
///
/// The wait between attempts grows as `delay = delay * multiplier + U(0,1)`,
/// with uniform sub-second jitter so concurrent callers do not retry in
/// lockstep. Waits are tokio sleeps, never busy-waits.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay_secs: f64,
    multiplier: f64,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay_secs: f64, multiplier: f64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay_secs,
            multiplier,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            config.initial_delay_secs,
            config.multiplier,
        )
    }

    /// Run `operation` until it succeeds or `max_attempts` is exhausted.
    ///
    /// Success returns immediately with no delay incurred. The error of the
    /// final attempt is propagated unchanged.
    pub async fn execute<F, Fut, T, E>(&self, operation_name: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut delay = self.initial_delay_secs;
        let mut attempt = 1u32;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt >= self.max_attempts => {
                    tracing::error!("{operation_name} failed after {attempt} attempts: {err}");
                    return Err(err);
                }
                Err(err) => {
                    tracing::warn!(
                        "{operation_name} attempt {attempt}/{} failed: {err}",
                        self.max_attempts
                    );
                    delay = delay * self.multiplier + rand::random::<f64>();
                    tracing::info!("retrying {operation_name} in {delay:.2}s");
                    tokio::time::sleep(Duration::from_secs_f64(delay)).await;
                    attempt += 1;
                }
            }
        }
    }
}
