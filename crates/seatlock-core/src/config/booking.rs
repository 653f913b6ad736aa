//! Booking coordinator configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::PaymentKind;

/// Booking coordinator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// How long a seat stays reserved for an unconfirmed booking, in milliseconds.
    #[serde(default = "default_lock_ttl")]
    pub lock_ttl_ms: u64,
    /// Payment kinds that get a built-in strategy at startup.
    #[serde(default = "default_payment_kinds")]
    pub enabled_payment_kinds: Vec<PaymentKind>,
}

impl BookingConfig {
    /// Seat lock TTL as a [`Duration`].
    pub fn lock_ttl(&self) -> Duration {
        Duration::from_millis(self.lock_ttl_ms)
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            lock_ttl_ms: default_lock_ttl(),
            enabled_payment_kinds: default_payment_kinds(),
        }
    }
}

fn default_lock_ttl() -> u64 {
    5000
}

fn default_payment_kinds() -> Vec<PaymentKind> {
    vec![PaymentKind::Card, PaymentKind::Upi]
}
