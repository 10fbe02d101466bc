use hopzero_domain::DomainError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Absolute point in time a single lookup attempt must finish by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Instant);

impl Deadline {
    pub fn after(timeout: Duration) -> Self {
        Self(Instant::now() + timeout)
    }

    pub fn instant(&self) -> Instant {
        self.0
    }

    /// Time left before expiry, zero once passed.
    pub fn remaining(&self) -> Duration {
        self.0.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.0
    }
}

/// Fixed attempt count with an independent deadline per attempt.
/// No backoff and no jitter between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub timeout: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, timeout: Duration) -> Self {
        Self { attempts, timeout }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            timeout: Duration::from_secs(3),
        }
    }
}

/// Runs `operation` until it succeeds or the policy runs out of attempts.
///
/// Each attempt gets a fresh [`Deadline`]. An attempt still pending when its
/// deadline passes is dropped and counted as [`DomainError::QueryTimeout`].
/// Every failed attempt is logged; the last error is returned.
pub async fn with_timeout_and_retry<T, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, DomainError>
where
    F: FnMut(Deadline) -> Fut,
    Fut: Future<Output = Result<T, DomainError>>,
{
    let attempts = policy.attempts.max(1);
    let mut last_error = DomainError::QueryTimeout;

    for attempt in 1..=attempts {
        let deadline = Deadline::after(policy.timeout);

        let result = match tokio::time::timeout_at(deadline.instant(), operation(deadline)).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::QueryTimeout),
        };

        match result {
            Ok(value) => {
                debug!(attempt, "Lookup attempt succeeded");
                return Ok(value);
            }
            Err(e) => {
                warn!(attempt, error = %e, "Attempt {} failed: {}", attempt, e);
                last_error = e;
            }
        }
    }

    Err(last_error)
}
