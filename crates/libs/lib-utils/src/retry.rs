//! # Retry
//!
//! Run a fallible async operation up to `max_attempts` times, sleeping
//! `base_delay * 2^i` after the i-th failure. The last error is returned when
//! every attempt fails.

use std::future::Future;
use std::time::Duration;

/// Default number of attempts used by API callers.
pub const DEFAULT_ATTEMPTS: u32 = 3;

/// Default delay before the first retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Delay applied after the failed attempt `attempt` (zero-based).
pub fn backoff_delay(base_delay: Duration, attempt: u32) -> Duration {
    base_delay.saturating_mul(2u32.saturating_pow(attempt))
}

/// Retry `op` with exponential backoff.
///
/// `max_attempts` of zero is treated as one attempt. No sleep follows the
/// final failure.
pub async fn retry<T, E, F, Fut>(max_attempts: u32, base_delay: Duration, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let attempts = max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt + 1 >= attempts => return Err(e),
            Err(e) => {
                let delay = backoff_delay(base_delay, attempt);
                tracing::debug!(attempt = attempt + 1, ?delay, "Retrying after error: {}", e);
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
