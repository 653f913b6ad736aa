//! Lock store trait for time-bounded exclusive seat reservations.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::LockKey;

/// Trait for lock store backends (in-memory or Redis).
///
/// Each key holds at most one live ownership record. A key is free when it
/// has no record or its record's expiry has passed. Implementations must make
/// [`acquire`](LockStore::acquire) a single compare-and-set per key: two
/// concurrent callers on the same free key can never both observe `true`.
///
/// Methods return [`AppResult`] only so that remote backends can report I/O
/// failures. Contention is never an error; it is reported as `false`.
#[async_trait]
pub trait LockStore: Send + Sync + std::fmt::Debug + 'static {
    /// Grant `owner` the key for `ttl` if the key is free.
    ///
    /// Returns `false` with no side effect when another live record exists.
    async fn acquire(&self, key: &LockKey, owner: &str, ttl: Duration) -> AppResult<bool>;

    /// Remove the record for `key` regardless of owner. Idempotent.
    async fn release(&self, key: &LockKey) -> AppResult<()>;

    /// Remove the record for `key` only if it is live and held by `owner`.
    ///
    /// Returns `true` if a record was removed.
    async fn release_if_owned(&self, key: &LockKey, owner: &str) -> AppResult<bool>;

    /// `true` if the key has no record or its record has expired.
    async fn is_expired(&self, key: &LockKey) -> AppResult<bool>;

    /// `true` iff a live record exists for the key and it belongs to `owner`.
    async fn is_owned_by(&self, key: &LockKey, owner: &str) -> AppResult<bool>;

    /// Drop every expired record. Returns how many were removed.
    ///
    /// Backends that expire keys natively may return `0`.
    async fn purge_expired(&self) -> AppResult<u64>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
