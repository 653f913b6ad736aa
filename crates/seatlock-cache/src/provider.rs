//! Lock store manager that dispatches to the configured backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use seatlock_core::config::LockStoreConfig;
use seatlock_core::error::AppError;
use seatlock_core::result::AppResult;
use seatlock_core::traits::LockStore;
use seatlock_core::types::LockKey;

/// Lock store manager that wraps the configured backend.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct LockStoreManager {
    /// The inner lock store.
    inner: Arc<dyn LockStore>,
}

impl LockStoreManager {
    /// Create a new lock store manager from configuration.
    pub async fn new(config: &LockStoreConfig) -> AppResult<Self> {
        let inner: Arc<dyn LockStore> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis lock store");
                Arc::new(crate::redis::RedisLockStore::connect(&config.redis).await?)
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory lock store");
                Arc::new(crate::memory::MemoryLockStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown lock store provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }
}

#[async_trait]
impl LockStore for LockStoreManager {
    async fn acquire(&self, key: &LockKey, owner: &str, ttl: Duration) -> AppResult<bool> {
        self.inner.acquire(key, owner, ttl).await
    }

    async fn release(&self, key: &LockKey) -> AppResult<()> {
        self.inner.release(key).await
    }

    async fn release_if_owned(&self, key: &LockKey, owner: &str) -> AppResult<bool> {
        self.inner.release_if_owned(key, owner).await
    }

    async fn is_expired(&self, key: &LockKey) -> AppResult<bool> {
        self.inner.is_expired(key).await
    }

    async fn is_owned_by(&self, key: &LockKey, owner: &str) -> AppResult<bool> {
        self.inner.is_owned_by(key, owner).await
    }

    async fn purge_expired(&self) -> AppResult<u64> {
        self.inner.purge_expired().await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatlock_core::error::ErrorKind;
    use seatlock_core::types::{SeatId, ShowId};

    #[tokio::test]
    async fn test_memory_provider_from_config() {
        let manager = LockStoreManager::new(&LockStoreConfig::default())
            .await
            .unwrap();
        let key = LockKey::new(ShowId(1), SeatId(1));

        assert!(manager.health_check().await.unwrap());
        assert!(
            manager
                .acquire(&key, "alice", Duration::from_secs(5))
                .await
                .unwrap()
        );
        assert!(manager.is_owned_by(&key, "alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_provider_is_rejected() {
        let config = LockStoreConfig {
            provider: "etcd".to_string(),
            ..LockStoreConfig::default()
        };
        let err = LockStoreManager::new(&config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(err.message.contains("etcd"));
    }
}
