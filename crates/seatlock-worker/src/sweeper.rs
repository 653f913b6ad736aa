//! Expiry sweeper. Periodically purges stale lock records.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use seatlock_core::config::SweeperConfig;
use seatlock_core::traits::LockStore;

/// Periodically asks the lock store to drop expired records.
#[derive(Debug, Clone)]
pub struct ExpirySweeper {
    /// Store to sweep.
    store: Arc<dyn LockStore>,
    /// Time between sweeps.
    interval: Duration,
}

impl ExpirySweeper {
    /// Create a sweeper from configuration.
    pub fn new(store: Arc<dyn LockStore>, config: &SweeperConfig) -> Self {
        Self {
            store,
            interval: config.interval(),
        }
    }

    /// Run one sweep. Returns the number of records removed.
    ///
    /// Backend errors are logged and counted as zero; the next tick retries.
    pub async fn sweep_once(&self) -> u64 {
        match self.store.purge_expired().await {
            Ok(purged) => {
                if purged > 0 {
                    tracing::debug!(purged, "Expiry sweep removed stale locks");
                }
                purged
            }
            Err(e) => {
                tracing::warn!("Expiry sweep failed: {}", e);
                0
            }
        }
    }

    /// Sweep on every interval tick until the cancel signal is received.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            "Expiry sweeper started with interval={}ms",
            self.interval.as_millis()
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Expiry sweeper received shutdown signal");
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.sweep_once().await;
                }
            }
        }

        tracing::info!("Expiry sweeper shut down");
    }

    /// Spawn [`run`](Self::run) onto the current runtime.
    pub fn spawn(self, cancel: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(cancel).await })
    }
}
