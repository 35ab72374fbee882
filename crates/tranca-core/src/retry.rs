//! Retry policy for lock acquisition
//!
//! The stop decision has two independent axes: a wall-clock deadline and a
//! failure-kind predicate, combined with logical OR. The wait decision is a
//! fixed delay between attempts. Each axis can be swapped (e.g. for
//! exponential backoff or an attempt cap) without touching the others.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use tranca_common::{LockError, Result, interval};

/// Time axis: no attempt may start once the deadline has passed.
///
/// Bound to a concrete start instant per acquisition call, so the same
/// policy can serve many calls while each keeps an absolute deadline.
#[derive(Debug, Clone, Copy)]
pub struct DeadlineStop {
    deadline: Instant,
}

impl DeadlineStop {
    /// Bind the deadline to an acquisition start instant.
    pub fn starting_at(start: Instant, timeout: Duration) -> Self {
        Self {
            deadline: start + timeout,
        }
    }

    pub fn expired_at(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Remaining time budget, zero once expired.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }
}

/// Failure axis: only contention is worth another attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryableKind;

impl RetryableKind {
    pub fn is_retryable(&self, err: &LockError) -> bool {
        matches!(err, LockError::NotAvailable(_))
    }
}

/// Wait axis: fixed delay applied strictly between unsuccessful attempts,
/// never before the first nor after a terminal outcome.
#[derive(Debug, Clone, Copy)]
pub struct FixedBackOff {
    period: Duration,
}

impl FixedBackOff {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

/// Composite retry policy: stop when the deadline passes OR the observed
/// failure is not retryable; wait a fixed delay between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    timeout: Duration,
    retryable: RetryableKind,
    backoff: FixedBackOff,
}

impl RetryPolicy {
    pub fn new(timeout: Duration, retry_interval: Duration) -> Self {
        Self {
            timeout,
            retryable: RetryableKind,
            backoff: FixedBackOff::new(retry_interval),
        }
    }

    /// Bind a deadline for one acquisition call.
    pub fn deadline_from(&self, start: Instant) -> DeadlineStop {
        DeadlineStop::starting_at(start, self.timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retryable(&self) -> &RetryableKind {
        &self.retryable
    }

    pub fn backoff(&self) -> &FixedBackOff {
        &self.backoff
    }
}

/// Configuration for building a [`RetryPolicy`] from interval expressions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total time budget for one acquisition call (e.g. "1s").
    pub timeout: String,
    /// Delay between attempts (e.g. "50ms").
    pub retry_interval: String,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            timeout: "1s".to_string(),
            retry_interval: "50ms".to_string(),
        }
    }
}

impl RetryConfig {
    pub fn new(timeout: &str, retry_interval: &str) -> Self {
        Self {
            timeout: timeout.to_string(),
            retry_interval: retry_interval.to_string(),
        }
    }

    /// Set the acquisition timeout expression.
    pub fn with_timeout(mut self, timeout: &str) -> Self {
        self.timeout = timeout.to_string();
        self
    }

    /// Set the retry interval expression.
    pub fn with_retry_interval(mut self, retry_interval: &str) -> Self {
        self.retry_interval = retry_interval.to_string();
        self
    }

    /// Build the policy, resolving both interval expressions.
    pub fn build(&self) -> Result<RetryPolicy> {
        let timeout = interval::to_duration(&self.timeout)?;
        let retry_interval = interval::to_duration(&self.retry_interval)?;
        Ok(RetryPolicy::new(timeout, retry_interval))
    }
}
