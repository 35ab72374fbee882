//! Retriable lock wrapper
//!
//! Drives repeated acquisition attempts against a backend according to a
//! `RetryPolicy`, returning the first token or a single terminal failure.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use tranca_common::{LockError, Result};

use crate::lock::{Lock, LockRequest, LockToken};
use crate::retry::RetryPolicy;

/// Lock wrapper that retries acquisition until it succeeds, the policy
/// deadline passes, or the backend reports a non-retryable failure.
///
/// The wrapper holds no shared mutable state across calls: each call owns
/// its start instant, deadline, and attempt loop, so independent
/// acquisitions may run concurrently on the same wrapper. The backoff sleep
/// is a plain `tokio::time::sleep`, cancelled by dropping the future, so a
/// cancelled caller never blocks for a spurious wait.
pub struct RetriableLock {
    inner: Arc<dyn Lock>,
    policy: RetryPolicy,
}

impl RetriableLock {
    pub fn new(inner: Arc<dyn Lock>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Acquire the lock, retrying while it is held by another owner.
    ///
    /// The first attempt always runs, even with a zero timeout. The deadline
    /// is consulted between attempts only; an attempt in flight when it
    /// passes is allowed to complete. Retryable outcomes are absorbed until
    /// the deadline passes, at which point the call fails with
    /// `LockError::NotAvailable`. Any other backend failure propagates
    /// unchanged on first occurrence.
    pub async fn acquire(&self, request: &LockRequest) -> Result<LockToken> {
        request.validate()?;

        let start = Instant::now();
        let deadline = self.policy.deadline_from(start);
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            match self
                .inner
                .acquire(&request.keys, &request.store_id, request.lease_ms)
                .await
            {
                Ok(Some(token)) => {
                    debug!(attempts, keys = ?request.keys, "lock acquired");
                    return Ok(token);
                }
                Ok(None) => {
                    debug!(attempts, keys = ?request.keys, "lock held by another owner");
                }
                Err(err) if self.policy.retryable().is_retryable(&err) => {
                    debug!(attempts, error = %err, "retryable acquisition failure");
                }
                Err(err) => return Err(err),
            }

            let now = Instant::now();
            // Sleep is capped at the remaining budget so the call never
            // outlives its deadline; a zero wait falls straight through to
            // the deadline check.
            let wait = self
                .policy
                .backoff()
                .period()
                .min(deadline.remaining_at(now));
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }

            if deadline.expired_at(Instant::now()) {
                warn!(attempts, keys = ?request.keys, timeout = ?self.policy.timeout(),
                    "lock acquisition timed out");
                return Err(LockError::NotAvailable(format!(
                    "gave up on {:?} after {} attempts in {:?}",
                    request.keys,
                    attempts,
                    self.policy.timeout()
                )));
            }
        }
    }

    /// Release a lock previously acquired through this wrapper.
    ///
    /// Releases are delegated to the backend and never retried.
    pub async fn release(&self, request: &LockRequest, token: &str) -> Result<bool> {
        self.inner
            .release(&request.keys, &request.store_id, token)
            .await
    }

    /// Extend the lease of a held lock. Never retried.
    pub async fn refresh(&self, request: &LockRequest, token: &str) -> Result<bool> {
        self.inner
            .refresh(&request.keys, &request.store_id, token, request.lease_ms)
            .await
    }
}
