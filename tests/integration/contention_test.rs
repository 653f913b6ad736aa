//! Integration tests for concurrent bookings on overlapping seats.

mod helpers;

use std::sync::Arc;

use seatlock_booking::{BookingError, PaymentRegistry};
use seatlock_core::config::AppConfig;
use seatlock_core::types::{BookingStatus, PaymentKind, SeatId, UserId};

use helpers::{CountingCard, SHOW, TestApp, seats};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_overlapping_requests_single_winner() {
    let app = Arc::new(TestApp::new());

    let x = {
        let app = Arc::clone(&app);
        tokio::spawn(async move {
            app.coordinator
                .create_booking(&UserId::from("x"), SHOW, &seats(&[2, 4]))
                .await
        })
    };
    let y = {
        let app = Arc::clone(&app);
        tokio::spawn(async move {
            app.coordinator
                .create_booking(&UserId::from("y"), SHOW, &seats(&[2, 6]))
                .await
        })
    };

    let x = x.await.unwrap();
    let y = y.await.unwrap();

    match (x, y) {
        (Ok(won), Err(BookingError::SeatUnavailable { seat_id })) => {
            assert_eq!(seat_id, SeatId(2));
            assert_eq!(won.user_id, UserId::from("x"));
            assert!(app.is_held_by(2, "x").await);
            assert!(app.is_held_by(4, "x").await);
            assert!(app.is_free(6).await);
        }
        (Err(BookingError::SeatUnavailable { seat_id }), Ok(won)) => {
            assert_eq!(seat_id, SeatId(2));
            assert_eq!(won.user_id, UserId::from("y"));
            assert!(app.is_held_by(2, "y").await);
            assert!(app.is_held_by(6, "y").await);
            assert!(app.is_free(4).await);
        }
        other => panic!("expected exactly one winner, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_users_one_seat() {
    let app = Arc::new(TestApp::new());

    let attempts = (0..32).map(|i| {
        let app = Arc::clone(&app);
        tokio::spawn(async move {
            app.coordinator
                .create_booking(&UserId::new(format!("user-{i}")), SHOW, &seats(&[1, 3]))
                .await
        })
    });

    let results = futures::future::join_all(attempts).await;
    let winners: Vec<_> = results
        .into_iter()
        .map(|joined| joined.unwrap())
        .filter_map(Result::ok)
        .collect();

    assert_eq!(winners.len(), 1);
    let winner = &winners[0];
    assert!(app.is_held_by(1, winner.user_id.as_str()).await);
    assert!(app.is_held_by(3, winner.user_id.as_str()).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_confirms_charge_once() {
    let card = Arc::new(CountingCard::default());
    let app = Arc::new(TestApp::with_payments(
        AppConfig::default(),
        PaymentRegistry::new().with(card.clone()),
    ));
    let booking = app
        .coordinator
        .create_booking(&UserId::from("x"), SHOW, &seats(&[3]))
        .await
        .unwrap();

    let confirms = (0..8).map(|_| {
        let app = Arc::clone(&app);
        let booking = booking.clone();
        tokio::spawn(async move {
            app.coordinator
                .confirm_booking(&booking, PaymentKind::Card)
                .await
        })
    });

    let results = futures::future::join_all(confirms).await;
    let confirmed = results
        .into_iter()
        .map(|joined| joined.unwrap())
        .filter(|result| result.is_ok())
        .count();

    assert_eq!(confirmed, 1);
    assert_eq!(card.charges(), 1);
    assert_eq!(
        app.coordinator.get_booking(booking.id).unwrap().status,
        BookingStatus::Confirmed
    );
}
