//! Lock abstraction and request model
//!
//! Defines the `Lock` trait implemented by storage backends and the
//! request/token types used by the acquirer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use tranca_common::{DEFAULT_STORE_ID, LockError, Result};

/// Opaque credential proving ownership of an acquired lock.
///
/// Returned by a backend on successful acquisition and required to release
/// or refresh the lock. The acquirer never retains it.
pub type LockToken = String;

/// A single lock acquisition request.
///
/// Keys are ordered, non-empty, and unique within a request. The lease is
/// how long the acquired lock stays valid before the backend may consider
/// it expired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockRequest {
    /// Keys to lock, in order.
    pub keys: Vec<String>,
    /// Store the keys live in (e.g. a table name or key prefix).
    pub store_id: String,
    /// Lease duration in milliseconds. Must be positive.
    pub lease_ms: u64,
}

impl LockRequest {
    /// Create a request for a single key in the default store.
    pub fn new(key: &str, lease_ms: u64) -> Self {
        Self {
            keys: vec![key.to_string()],
            store_id: DEFAULT_STORE_ID.to_string(),
            lease_ms,
        }
    }

    /// Create a request spanning multiple keys in the default store.
    pub fn with_keys(keys: Vec<String>, lease_ms: u64) -> Self {
        Self {
            keys,
            store_id: DEFAULT_STORE_ID.to_string(),
            lease_ms,
        }
    }

    /// Set the store identifier.
    pub fn with_store_id(mut self, store_id: &str) -> Self {
        self.store_id = store_id.to_string();
        self
    }

    /// Validate the request invariants: at least one key, no blank or
    /// duplicate keys, a non-empty store identifier, and a positive lease.
    pub fn validate(&self) -> Result<()> {
        if self.keys.is_empty() {
            return Err(LockError::IllegalArgument(
                "keys must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for key in &self.keys {
            if key.is_empty() {
                return Err(LockError::IllegalArgument(
                    "keys must not be blank".to_string(),
                ));
            }
            if !seen.insert(key.as_str()) {
                return Err(LockError::IllegalArgument(format!(
                    "duplicate key '{}'",
                    key
                )));
            }
        }

        if self.store_id.is_empty() {
            return Err(LockError::IllegalArgument(
                "store_id must not be blank".to_string(),
            ));
        }

        if self.lease_ms == 0 {
            return Err(LockError::IllegalArgument(
                "lease must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Storage backend contract for distributed locks.
///
/// Contention is a first-class outcome, not an error: `acquire` returns
/// `Ok(None)` when the lock is currently held by another owner. Errors are
/// reserved for infrastructure failures and abort any retry loop wrapping
/// this call.
#[async_trait::async_trait]
pub trait Lock: Send + Sync {
    /// Try to acquire the lock once.
    ///
    /// Returns `Ok(Some(token))` on success and `Ok(None)` when some key is
    /// currently held by another owner.
    async fn acquire(
        &self,
        keys: &[String],
        store_id: &str,
        lease_ms: u64,
    ) -> Result<Option<LockToken>>;

    /// Release a previously acquired lock.
    ///
    /// Returns `true` when the token released the lock, `false` when the
    /// token no longer matches (expired or taken over).
    async fn release(&self, keys: &[String], store_id: &str, token: &str) -> Result<bool>;

    /// Extend the lease of a held lock.
    ///
    /// Backends without refresh support keep the default implementation,
    /// which reports `false`.
    async fn refresh(
        &self,
        keys: &[String],
        store_id: &str,
        token: &str,
        lease_ms: u64,
    ) -> Result<bool> {
        let _ = (keys, store_id, token, lease_ms);
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_single_key() {
        let request = LockRequest::new("order:42", 1000);
        assert_eq!(request.keys, vec!["order:42"]);
        assert_eq!(request.store_id, DEFAULT_STORE_ID);
        assert_eq!(request.lease_ms, 1000);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_builder() {
        let request = LockRequest::with_keys(vec!["a".to_string(), "b".to_string()], 500)
            .with_store_id("orders");
        assert_eq!(request.keys.len(), 2);
        assert_eq!(request.store_id, "orders");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_keys() {
        let request = LockRequest::with_keys(vec![], 1000);
        assert!(matches!(
            request.validate(),
            Err(LockError::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_validate_rejects_blank_key() {
        let request = LockRequest::with_keys(vec!["".to_string()], 1000);
        assert!(matches!(
            request.validate(),
            Err(LockError::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_keys() {
        let request = LockRequest::with_keys(vec!["a".to_string(), "a".to_string()], 1000);
        let err = request.validate().unwrap_err();
        assert_eq!(err.to_string(), "illegal argument: duplicate key 'a'");
    }

    #[test]
    fn test_validate_rejects_zero_lease() {
        let request = LockRequest::new("a", 0);
        assert!(matches!(
            request.validate(),
            Err(LockError::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_validate_rejects_blank_store() {
        let request = LockRequest::new("a", 1000).with_store_id("");
        assert!(matches!(
            request.validate(),
            Err(LockError::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_request_serde_roundtrip() {
        let request = LockRequest::new("order:42", 1000);
        let json = serde_json::to_string(&request).unwrap();
        let parsed: LockRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.keys, request.keys);
        assert_eq!(parsed.lease_ms, request.lease_ms);
    }
}
