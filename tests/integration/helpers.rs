//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use seatlock_booking::{BookingCoordinator, PaymentRegistry, SeatCatalog, SeatType};
use seatlock_cache::memory::MemoryLockStore;
use seatlock_core::config::{AppConfig, SweeperConfig};
use seatlock_core::traits::{LockStore, PaymentResult, PaymentStrategy};
use seatlock_core::types::{Booking, LockKey, Money, PaymentKind, SeatId, ShowId};
use seatlock_worker::ExpirySweeper;

/// Show used by every test.
pub const SHOW: ShowId = ShowId(1);

/// Test application context
pub struct TestApp {
    /// In-memory lock store shared with the coordinator
    pub store: MemoryLockStore,
    /// Coordinator under test
    pub coordinator: BookingCoordinator,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a coordinator over a fresh store with the default 5s TTL.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a coordinator from an explicit configuration.
    pub fn with_config(config: AppConfig) -> Self {
        let payments = PaymentRegistry::with_builtin(&config.booking.enabled_payment_kinds);
        Self::with_payments(config, payments)
    }

    /// Create a coordinator that charges through `payments`.
    pub fn with_payments(config: AppConfig, payments: PaymentRegistry) -> Self {
        let store = MemoryLockStore::new();
        let coordinator = BookingCoordinator::new(
            Arc::new(store.clone()),
            Arc::new(catalog()),
            payments,
            &config.booking,
        );
        Self {
            store,
            coordinator,
            config,
        }
    }

    /// Sweeper over this app's store.
    pub fn sweeper(&self, interval_ms: u64) -> ExpirySweeper {
        let config = SweeperConfig {
            enabled: true,
            interval_ms,
        };
        ExpirySweeper::new(Arc::new(self.store.clone()), &config)
    }

    /// Whether a seat of [`SHOW`] is free.
    pub async fn is_free(&self, seat: u32) -> bool {
        self.store.is_expired(&key(seat)).await.unwrap()
    }

    /// Whether a seat of [`SHOW`] is held by `owner`.
    pub async fn is_held_by(&self, seat: u32, owner: &str) -> bool {
        self.store.is_owned_by(&key(seat), owner).await.unwrap()
    }

    /// Lock a seat directly in the store, bypassing the coordinator.
    pub async fn hold(&self, seat: u32, owner: &str, ttl: Duration) -> bool {
        self.store.acquire(&key(seat), owner, ttl).await.unwrap()
    }
}

/// Card strategy that approves every charge and counts them.
#[derive(Debug, Default)]
pub struct CountingCard {
    charges: AtomicUsize,
}

impl CountingCard {
    /// Number of charges made so far.
    pub fn charges(&self) -> usize {
        self.charges.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentStrategy for CountingCard {
    fn kind(&self) -> PaymentKind {
        PaymentKind::Card
    }

    async fn pay(&self, _booking: &Booking) -> PaymentResult {
        self.charges.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        PaymentResult::Approved
    }
}

/// Lock key for a seat of [`SHOW`].
pub fn key(seat: u32) -> LockKey {
    LockKey::new(SHOW, SeatId(seat))
}

/// Seat ids from plain numbers.
pub fn seats(ids: &[u32]) -> Vec<SeatId> {
    ids.iter().copied().map(SeatId).collect()
}

/// Seats 1-2 regular at 10.00, 3-4 recliners at 20.00.
pub fn catalog() -> SeatCatalog {
    let mut catalog = SeatCatalog::new();
    catalog
        .add_seat(SHOW, SeatId(1), SeatType::Regular, Money::from_cents(1000))
        .add_seat(SHOW, SeatId(2), SeatType::Regular, Money::from_cents(1000))
        .add_seat(SHOW, SeatId(3), SeatType::Recliner, Money::from_cents(2000))
        .add_seat(SHOW, SeatId(4), SeatType::Recliner, Money::from_cents(2000))
        .add_seat(SHOW, SeatId(6), SeatType::Regular, Money::from_cents(1000));
    catalog
}
