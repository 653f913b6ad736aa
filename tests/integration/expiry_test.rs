//! Integration tests for reservation expiry with the background sweeper.

mod helpers;

use std::time::Duration;

use tokio::sync::watch;

use seatlock_core::types::{BookingStatus, PaymentKind, UserId};

use helpers::{SHOW, TestApp, seats};

#[tokio::test(start_paused = true)]
async fn test_abandoned_booking_self_heals() {
    let app = TestApp::new();
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let sweeper = app.sweeper(100).spawn(cancel_rx);

    let abandoned = app
        .coordinator
        .create_booking(&UserId::from("user3"), SHOW, &seats(&[1, 2]))
        .await
        .unwrap();
    assert_eq!(app.store.record_count(), 2);

    tokio::time::sleep(app.coordinator.lock_ttl() + Duration::from_millis(500)).await;
    assert_eq!(app.store.record_count(), 0);

    let takeover = app
        .coordinator
        .create_booking(&UserId::from("user4"), SHOW, &seats(&[1, 2]))
        .await
        .unwrap();

    assert!(
        app.coordinator
            .confirm_booking(&abandoned, PaymentKind::Upi)
            .await
            .is_err()
    );
    let confirmed = app
        .coordinator
        .confirm_booking(&takeover, PaymentKind::Card)
        .await
        .unwrap();
    assert_eq!(confirmed.status, BookingStatus::Confirmed);
    assert_eq!(
        app.coordinator.get_booking(abandoned.id).unwrap().status,
        BookingStatus::Created
    );

    cancel_tx.send(true).unwrap();
    sweeper.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_expiry_without_sweeper() {
    let app = TestApp::new();

    app.coordinator
        .create_booking_with_ttl(
            &UserId::from("x"),
            SHOW,
            &seats(&[3]),
            Duration::from_millis(200),
        )
        .await
        .unwrap();

    tokio::time::advance(Duration::from_millis(250)).await;

    assert_eq!(app.store.record_count(), 1);
    assert!(app.is_free(3).await);
    app.coordinator
        .create_booking(&UserId::from("y"), SHOW, &seats(&[3]))
        .await
        .unwrap();
}
