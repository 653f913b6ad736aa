//! Redis lock store implementation.
//!
//! Expiry is delegated to Redis key TTLs: a key that exists is live, so
//! `SET NX PX` is the whole compare-and-set.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::debug;

use seatlock_core::config::RedisLockConfig;
use seatlock_core::error::{AppError, ErrorKind};
use seatlock_core::result::AppResult;
use seatlock_core::traits::LockStore;
use seatlock_core::types::LockKey;

use super::client;
use crate::keys;

/// Lua script for owner-checked release.
///
/// KEYS[1] = lock key
/// ARGV[1] = owner
///
/// Returns 1 if the key was deleted, 0 otherwise.
const RELEASE_IF_OWNED_SCRIPT: &str = r#"
    if redis.call('GET', KEYS[1]) == ARGV[1] then
        return redis.call('DEL', KEYS[1])
    end
    return 0
"#;

/// Redis-backed lock store for multi-node deployments.
#[derive(Debug, Clone)]
pub struct RedisLockStore {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisLockStore {
    /// Connect to the Redis server named in `config`.
    pub async fn connect(config: &RedisLockConfig) -> AppResult<Self> {
        Ok(Self {
            conn: client::connect(&config.url).await?,
            key_prefix: config.key_prefix.clone(),
        })
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
    }

    fn full_key(&self, key: &LockKey) -> String {
        format!("{}{}", self.key_prefix, keys::seat_lock(key))
    }
}

/// Redis rejects `PX 0`, so sub-millisecond TTLs round up.
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl LockStore for RedisLockStore {
    async fn acquire(&self, key: &LockKey, owner: &str, ttl: Duration) -> AppResult<bool> {
        let full_key = self.full_key(key);
        let mut conn = self.conn.clone();

        // SET key owner PX ttl NX
        let result: Option<String> = redis::cmd("SET")
            .arg(&full_key)
            .arg(owner)
            .arg("PX")
            .arg(ttl_millis(ttl))
            .arg("NX")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        let granted = result.is_some();
        debug!(key = %key, owner, granted, "Lock acquire via Redis");
        Ok(granted)
    }

    async fn release(&self, key: &LockKey) -> AppResult<()> {
        let full_key = self.full_key(key);
        let mut conn = self.conn.clone();
        let _: i64 = conn.del(&full_key).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn release_if_owned(&self, key: &LockKey, owner: &str) -> AppResult<bool> {
        let full_key = self.full_key(key);
        let mut conn = self.conn.clone();

        let removed: i64 = redis::Script::new(RELEASE_IF_OWNED_SCRIPT)
            .key(&full_key)
            .arg(owner)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        debug!(key = %key, owner, removed, "Owner-checked lock release via Redis");
        Ok(removed > 0)
    }

    async fn is_expired(&self, key: &LockKey) -> AppResult<bool> {
        let full_key = self.full_key(key);
        let mut conn = self.conn.clone();
        let exists: bool = conn.exists(&full_key).await.map_err(Self::map_err)?;
        Ok(!exists)
    }

    async fn is_owned_by(&self, key: &LockKey, owner: &str) -> AppResult<bool> {
        let full_key = self.full_key(key);
        let mut conn = self.conn.clone();
        let holder: Option<String> = conn.get(&full_key).await.map_err(Self::map_err)?;
        Ok(holder.as_deref() == Some(owner))
    }

    async fn purge_expired(&self) -> AppResult<u64> {
        Ok(0)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.conn.clone();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}
