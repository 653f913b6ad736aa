//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field carries a serde default, so an empty source
//! yields a usable configuration.

pub mod booking;
pub mod lock_store;
pub mod logging;
pub mod sweeper;

use serde::{Deserialize, Serialize};

pub use self::booking::BookingConfig;
pub use self::lock_store::{LockStoreConfig, RedisLockConfig};
pub use self::logging::LoggingConfig;
pub use self::sweeper::SweeperConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// files (default.toml + environment overlay) and `SEATLOCK__*` variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Lock store backend settings.
    #[serde(default)]
    pub lock_store: LockStoreConfig,
    /// Booking coordinator settings.
    #[serde(default)]
    pub booking: BookingConfig,
    /// Expiry sweeper settings.
    #[serde(default)]
    pub sweeper: SweeperConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default` with an environment-specific overlay
    /// and environment variables prefixed with `SEATLOCK__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SEATLOCK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from an inline TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that deserialize fine but cannot be run.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.booking.lock_ttl_ms == 0 {
            return Err(AppError::configuration(
                "booking.lock_ttl_ms must be greater than zero",
            ));
        }
        if self.sweeper.interval_ms == 0 {
            return Err(AppError::configuration(
                "sweeper.interval_ms must be greater than zero",
            ));
        }
        Ok(())
    }
}
