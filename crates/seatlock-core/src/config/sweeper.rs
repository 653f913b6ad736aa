//! Expiry sweeper configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Background expiry sweeper configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweeperConfig {
    /// Whether the sweeper is started.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Interval between sweeps in milliseconds.
    #[serde(default = "default_interval")]
    pub interval_ms: u64,
}

impl SweeperConfig {
    /// Sweep interval as a [`Duration`], never shorter than 1ms.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            interval_ms: default_interval(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_interval() -> u64 {
    100
}
