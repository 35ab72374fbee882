//! Tranca Core - Retriable distributed lock client
//!
//! This crate provides:
//! - The `Lock` trait implemented by storage backends
//! - Request and token models for lock acquisition
//! - Retry policy with independent deadline and failure-kind stop axes
//! - `RetriableLock`, the acquirer driving bounded-time retries
//! - An in-process backend for tests and embedded use

pub mod lock;
pub mod memory;
pub mod retriable;
pub mod retry;

// Re-exports for convenience
pub use lock::{Lock, LockRequest, LockToken};
pub use tranca_common::{LockError, Result};
pub use memory::MemoryLock;
pub use retriable::RetriableLock;
pub use retry::{DeadlineStop, FixedBackOff, RetryConfig, RetryPolicy, RetryableKind};
