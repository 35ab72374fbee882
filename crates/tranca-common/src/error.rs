//! Error types for Tranca
//!
//! This module defines:
//! - `LockError`: the failure taxonomy shared by every Tranca component
//! - `Result`: crate-wide result alias

/// Failure taxonomy for lock acquisition
///
/// Only `NotAvailable` is retryable; every other variant aborts a retry
/// loop on first occurrence.
#[derive(thiserror::Error, Debug)]
pub enum LockError {
    /// Malformed duration expression, reported when building a retry policy.
    #[error("invalid interval expression: '{0}'")]
    InvalidInterval(String),

    /// The lock is currently held by another owner. Surfaces to callers
    /// only once the acquisition deadline passes.
    #[error("lock not available: {0}")]
    NotAvailable(String),

    /// Request validation failure.
    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    /// Any other backend failure (connectivity, serialization, corruption).
    #[error("backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LockError>;
