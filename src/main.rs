//! SeatLock demo. Wires the lock store, sweeper and booking coordinator
//! together and replays a short booking walkthrough.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use seatlock_booking::{BookingCoordinator, BookingResult, PaymentRegistry, SeatCatalog, SeatType};
use seatlock_cache::LockStoreManager;
use seatlock_core::config::AppConfig;
use seatlock_core::error::AppError;
use seatlock_core::traits::LockStore;
use seatlock_core::types::{Booking, Money, PaymentKind, SeatId, ShowId, UserId};
use seatlock_worker::ExpirySweeper;

const SHOW: ShowId = ShowId(1);

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("SEATLOCK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Seats 1-2 regular, 3-4 recliners; 6, 8 and 9 are unpriced.
fn demo_catalog() -> SeatCatalog {
    let mut catalog = SeatCatalog::new();
    catalog
        .add_seat(SHOW, SeatId(1), SeatType::Regular, Money::from_cents(1000))
        .add_seat(SHOW, SeatId(2), SeatType::Regular, Money::from_cents(1000))
        .add_seat(SHOW, SeatId(3), SeatType::Recliner, Money::from_cents(2000))
        .add_seat(SHOW, SeatId(4), SeatType::Recliner, Money::from_cents(2000));
    catalog
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting SeatLock demo v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Lock store ───────────────────────────────────────
    let store: Arc<dyn LockStore> = Arc::new(LockStoreManager::new(&config.lock_store).await?);
    if !store.health_check().await? {
        return Err(AppError::cache("Lock store health check failed"));
    }

    // ── Step 2: Expiry sweeper ───────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper_handle = if config.sweeper.enabled {
        Some(ExpirySweeper::new(Arc::clone(&store), &config.sweeper).spawn(shutdown_rx))
    } else {
        tracing::info!("Expiry sweeper disabled");
        None
    };

    // ── Step 3: Coordinator ──────────────────────────────────────
    let coordinator = BookingCoordinator::new(
        Arc::clone(&store),
        Arc::new(demo_catalog()),
        PaymentRegistry::with_builtin(&config.booking.enabled_payment_kinds),
        &config.booking,
    );

    single_booking(&coordinator).await?;
    overlapping_bookings(&coordinator).await;
    expiry_takeover(&coordinator).await?;

    // ── Shutdown ─────────────────────────────────────────────────
    let _ = shutdown_tx.send(true);
    if let Some(handle) = sweeper_handle {
        handle
            .await
            .map_err(|e| AppError::internal(format!("Sweeper task failed: {e}")))?;
    }

    tracing::info!("Demo complete");
    Ok(())
}

async fn single_booking(coordinator: &BookingCoordinator) -> Result<(), AppError> {
    tracing::info!("Walkthrough 1: one user books seats 1 and 3");
    let booking = coordinator
        .create_booking(&UserId::from("user1"), SHOW, &[SeatId(1), SeatId(3)])
        .await?;
    let confirmed = coordinator
        .confirm_booking(&booking, PaymentKind::Card)
        .await?;
    tracing::info!("{}", confirmed);
    Ok(())
}

async fn overlapping_bookings(coordinator: &BookingCoordinator) {
    tracing::info!("Walkthrough 2: two users race for seat 2");

    let attempts = [
        ("user2", [SeatId(2), SeatId(4)], PaymentKind::Upi, 1000),
        ("user1", [SeatId(2), SeatId(6)], PaymentKind::Card, 500),
    ]
    .map(|(user, seats, kind, delay_ms)| {
        let coordinator = coordinator.clone();
        tokio::spawn(async move {
            let user = UserId::from(user);
            let result: BookingResult<Booking> = async {
                let booking = coordinator.create_booking(&user, SHOW, &seats).await?;
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                coordinator.confirm_booking(&booking, kind).await
            }
            .await;
            match result {
                Ok(booking) => tracing::info!("{} booked: {}", user, booking),
                Err(e) => tracing::warn!("{} booking failed: {}", user, e),
            }
        })
    });

    for handle in attempts {
        if let Err(e) = handle.await {
            tracing::error!("Booking task panicked: {}", e);
        }
    }
}

async fn expiry_takeover(coordinator: &BookingCoordinator) -> Result<(), AppError> {
    tracing::info!("Walkthrough 3: an unpaid reservation expires and is taken over");

    let abandoned = coordinator
        .create_booking(&UserId::from("user3"), SHOW, &[SeatId(8), SeatId(9)])
        .await?;

    tokio::time::sleep(coordinator.lock_ttl() + Duration::from_millis(500)).await;

    let takeover = coordinator
        .create_booking(&UserId::from("user4"), SHOW, &[SeatId(8), SeatId(9)])
        .await?;

    if let Err(e) = coordinator
        .confirm_booking(&abandoned, PaymentKind::Upi)
        .await
    {
        tracing::warn!("user3 could not pay after expiry: {}", e);
    }

    let confirmed = coordinator
        .confirm_booking(&takeover, PaymentKind::Card)
        .await?;
    tracing::info!("{}", confirmed);
    Ok(())
}
