//! Bounded retry for database-touching operations.
//!
//! Attempts run strictly sequentially. Only failures classified transient by
//! [`Transient`] are retried; anything else propagates on the spot. Backoff
//! is linear and uncapped: the sleep before attempt n+1 is `base_delay * n`.
//! The final failure is surfaced verbatim, never wrapped.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::Transient;

/// Attempt budget and delay unit for [`execute`].
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Clamped to at least 1.
    pub max_attempts: u32,
    /// Delay unit; the wait before attempt n+1 is `base_delay * n`.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }
}

/// Runs `operation` until it succeeds, fails permanently, or exhausts the
/// attempt budget. Returns the first success's value or the last failure
/// unchanged.
///
/// The operation is a zero-argument closure so each attempt re-runs it from
/// scratch; it holds no state between attempts, and concurrent `execute`
/// calls are fully independent.
pub async fn execute<T, E, F, Fut>(
    policy: RetryPolicy,
    label: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Transient + Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt: u32 = 1;

    loop {
        debug!(label, attempt, max_attempts, "database operation attempt");

        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                warn!(
                    label,
                    attempt,
                    max_attempts,
                    error = %err,
                    "database operation failed"
                );

                if !err.is_transient() || attempt == max_attempts {
                    return Err(err);
                }

                tokio::time::sleep(policy.base_delay * attempt).await;
                attempt += 1;
            }
        }
    }
}
