//! Tranca Common - Shared types and utilities
//!
//! This crate provides the foundational pieces used across all Tranca
//! components:
//! - Error taxonomy for lock acquisition
//! - Interval expression parsing

pub mod error;
pub mod interval;

// Re-exports for convenience
pub use error::{LockError, Result};
pub use interval::{to_duration, to_millis};

/// Default store identifier used when a caller does not specify one
pub const DEFAULT_STORE_ID: &str = "lock";
