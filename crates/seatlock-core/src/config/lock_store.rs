//! Lock store backend configuration.

use serde::{Deserialize, Serialize};

/// Top-level lock store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockStoreConfig {
    /// Backend type: `"memory"` or `"redis"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Redis-specific configuration.
    #[serde(default)]
    pub redis: RedisLockConfig,
}

impl Default for LockStoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            redis: RedisLockConfig::default(),
        }
    }
}

/// Redis lock backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisLockConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Key prefix for all seat lock keys.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for RedisLockConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_key_prefix() -> String {
    "seatlock:".to_string()
}
