//! In-process lock backend
//!
//! A single-process `Lock` implementation over a shared map, used by the
//! test suite and by embedded single-node deployments.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use uuid::Uuid;

use tranca_common::Result;

use crate::lock::{Lock, LockToken};

/// Holder entry for one locked key.
#[derive(Debug, Clone)]
struct Holder {
    token: LockToken,
    expires_at: Instant,
}

impl Holder {
    fn expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Map-backed lock for single-process use.
///
/// Keys are namespaced per store. Acquisition is all-or-nothing across the
/// request's keys under a single table lock; one UUID token covers them all.
/// Expired entries count as free and are replaced on the next acquisition.
#[derive(Default)]
pub struct MemoryLock {
    holders: Mutex<HashMap<String, Holder>>,
}

impl MemoryLock {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_key(store_id: &str, key: &str) -> String {
        format!("{}:{}", store_id, key)
    }

    /// Number of live (unexpired) holder entries, for diagnostics.
    pub fn live_entries(&self) -> usize {
        let now = Instant::now();
        self.holders
            .lock()
            .values()
            .filter(|holder| !holder.expired(now))
            .count()
    }
}

#[async_trait::async_trait]
impl Lock for MemoryLock {
    async fn acquire(
        &self,
        keys: &[String],
        store_id: &str,
        lease_ms: u64,
    ) -> Result<Option<LockToken>> {
        let now = Instant::now();
        let mut holders = self.holders.lock();

        for key in keys {
            if let Some(holder) = holders.get(&Self::entry_key(store_id, key))
                && !holder.expired(now)
            {
                return Ok(None);
            }
        }

        let token = Uuid::new_v4().to_string();
        let expires_at = now + Duration::from_millis(lease_ms);
        for key in keys {
            holders.insert(
                Self::entry_key(store_id, key),
                Holder {
                    token: token.clone(),
                    expires_at,
                },
            );
        }

        Ok(Some(token))
    }

    async fn release(&self, keys: &[String], store_id: &str, token: &str) -> Result<bool> {
        let mut holders = self.holders.lock();

        let owned = keys.iter().all(|key| {
            holders
                .get(&Self::entry_key(store_id, key))
                .is_some_and(|holder| holder.token == token)
        });
        if !owned {
            return Ok(false);
        }

        for key in keys {
            holders.remove(&Self::entry_key(store_id, key));
        }
        Ok(true)
    }

    async fn refresh(
        &self,
        keys: &[String],
        store_id: &str,
        token: &str,
        lease_ms: u64,
    ) -> Result<bool> {
        let now = Instant::now();
        let mut holders = self.holders.lock();

        let owned = keys.iter().all(|key| {
            holders
                .get(&Self::entry_key(store_id, key))
                .is_some_and(|holder| holder.token == token && !holder.expired(now))
        });
        if !owned {
            return Ok(false);
        }

        let expires_at = now + Duration::from_millis(lease_ms);
        for key in keys {
            if let Some(holder) = holders.get_mut(&Self::entry_key(store_id, key)) {
                holder.expires_at = expires_at;
            }
        }
        Ok(true)
    }
}
