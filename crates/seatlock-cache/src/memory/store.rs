//! In-memory lock store backed by a sharded concurrent map.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::time::Instant;
use tracing::debug;

use seatlock_core::result::AppResult;
use seatlock_core::traits::LockStore;
use seatlock_core::types::LockKey;

/// Shortest TTL a record is stored with. Matches the Redis `PX` floor.
const MIN_TTL: Duration = Duration::from_millis(1);

/// Ownership record for one key.
#[derive(Debug, Clone)]
struct LockRecord {
    /// Current holder.
    owner: String,
    /// Instant at which the record stops counting.
    expires_at: Instant,
}

impl LockRecord {
    fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// In-memory lock store.
///
/// Every read-check-write happens while holding the map entry for the key,
/// which locks only that key's shard. Expiry is measured on the Tokio clock,
/// so paused-time tests can advance it deterministically.
#[derive(Debug, Clone, Default)]
pub struct MemoryLockStore {
    records: Arc<DashMap<LockKey, LockRecord>>,
}

impl MemoryLockStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held, expired or not.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

#[async_trait]
impl LockStore for MemoryLockStore {
    async fn acquire(&self, key: &LockKey, owner: &str, ttl: Duration) -> AppResult<bool> {
        let now = Instant::now();
        let record = LockRecord {
            owner: owner.to_string(),
            expires_at: now + ttl.max(MIN_TTL),
        };

        let granted = match self.records.entry(*key) {
            Entry::Occupied(mut entry) => {
                if entry.get().is_expired_at(now) {
                    entry.insert(record);
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(record);
                true
            }
        };

        debug!(key = %key, owner, granted, "Lock acquire");
        Ok(granted)
    }

    async fn release(&self, key: &LockKey) -> AppResult<()> {
        if self.records.remove(key).is_some() {
            debug!(key = %key, "Lock released");
        }
        Ok(())
    }

    async fn release_if_owned(&self, key: &LockKey, owner: &str) -> AppResult<bool> {
        let now = Instant::now();
        let removed = self
            .records
            .remove_if(key, |_, record| {
                record.owner == owner && !record.is_expired_at(now)
            })
            .is_some();
        debug!(key = %key, owner, removed, "Owner-checked lock release");
        Ok(removed)
    }

    async fn is_expired(&self, key: &LockKey) -> AppResult<bool> {
        let now = Instant::now();
        Ok(self
            .records
            .get(key)
            .is_none_or(|record| record.is_expired_at(now)))
    }

    async fn is_owned_by(&self, key: &LockKey, owner: &str) -> AppResult<bool> {
        let now = Instant::now();
        Ok(self
            .records
            .get(key)
            .is_some_and(|record| !record.is_expired_at(now) && record.owner == owner))
    }

    async fn purge_expired(&self) -> AppResult<u64> {
        let now = Instant::now();
        let mut purged = 0u64;

        // retain evaluates each entry under its shard's write lock, so a record
        // re-acquired after the sweep started is seen with its new expiry.
        self.records.retain(|_, record| {
            let keep = !record.is_expired_at(now);
            if !keep {
                purged += 1;
            }
            keep
        });

        if purged > 0 {
            debug!(purged, "Purged expired locks");
        }
        Ok(purged)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
