//! Integration tests for the reserve → confirm booking flow.

mod helpers;

use std::time::Duration;

use seatlock_booking::BookingError;
use seatlock_core::error::{AppError, ErrorKind};
use seatlock_core::types::{BookingStatus, Money, PaymentKind, SeatId, UserId};

use helpers::{SHOW, TestApp, seats};

#[tokio::test(start_paused = true)]
async fn test_book_and_confirm_with_card() {
    let app = TestApp::new();
    let user = UserId::from("x");

    let booking = app
        .coordinator
        .create_booking(&user, SHOW, &seats(&[1, 3]))
        .await
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Created);
    assert_eq!(booking.amount, Money::from_cents(3000));
    assert!(app.is_held_by(1, "x").await);
    assert!(app.is_held_by(3, "x").await);

    let confirmed = app
        .coordinator
        .confirm_booking(&booking, PaymentKind::Card)
        .await
        .unwrap();
    assert_eq!(confirmed.status, BookingStatus::Confirmed);
    assert_eq!(confirmed.payment_kind, Some(PaymentKind::Card));
    assert!(app.is_free(1).await);
    assert!(app.is_free(3).await);
}

#[tokio::test(start_paused = true)]
async fn test_failed_create_leaves_earlier_seats_free() {
    let app = TestApp::new();
    assert!(app.hold(3, "someone-else", Duration::from_secs(5)).await);

    let err = app
        .coordinator
        .create_booking(&UserId::from("x"), SHOW, &seats(&[1, 2, 3]))
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::SeatUnavailable { seat_id } if seat_id == SeatId(3)));
    assert!(app.is_free(1).await);
    assert!(app.is_free(2).await);
    assert!(app.is_held_by(3, "someone-else").await);
}

#[tokio::test(start_paused = true)]
async fn test_confirm_after_ttl_fails_and_seat_is_reusable() {
    let app = TestApp::new();

    let booking = app
        .coordinator
        .create_booking_with_ttl(
            &UserId::from("x"),
            SHOW,
            &seats(&[2]),
            Duration::from_millis(1000),
        )
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(1500)).await;

    let err = app
        .coordinator
        .confirm_booking(&booking, PaymentKind::Card)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::SeatUnavailable { seat_id } if seat_id == SeatId(2)));
    assert!(app.hold(2, "y", Duration::from_secs(5)).await);
}

#[tokio::test(start_paused = true)]
async fn test_second_confirm_is_invalid_state() {
    let app = TestApp::new();

    let booking = app
        .coordinator
        .create_booking(&UserId::from("x"), SHOW, &seats(&[4]))
        .await
        .unwrap();
    app.coordinator
        .confirm_booking(&booking, PaymentKind::Upi)
        .await
        .unwrap();

    let err = app
        .coordinator
        .confirm_booking(&booking, PaymentKind::Upi)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InvalidState { .. }));

    let app_err: AppError = err.into();
    assert_eq!(app_err.kind, ErrorKind::Conflict);
}

#[tokio::test(start_paused = true)]
async fn test_wallet_is_not_enabled_by_default() {
    let app = TestApp::new();

    let booking = app
        .coordinator
        .create_booking(&UserId::from("x"), SHOW, &seats(&[1]))
        .await
        .unwrap();
    let err = app
        .coordinator
        .confirm_booking(&booking, PaymentKind::Wallet)
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::PaymentFailure { .. }));
    assert!(app.is_held_by(1, "x").await);
    assert_eq!(
        app.coordinator.get_booking(booking.id).unwrap().status,
        BookingStatus::Created
    );
}

#[tokio::test(start_paused = true)]
async fn test_cancel_frees_seats_for_others() {
    let app = TestApp::new();

    let booking = app
        .coordinator
        .create_booking(&UserId::from("x"), SHOW, &seats(&[1, 2]))
        .await
        .unwrap();
    let cancelled = app.coordinator.cancel_booking(&booking).await.unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    let other = app
        .coordinator
        .create_booking(&UserId::from("y"), SHOW, &seats(&[1, 2]))
        .await
        .unwrap();
    assert_eq!(other.amount, Money::from_cents(2000));
}
