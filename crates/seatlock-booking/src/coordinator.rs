//! Booking coordinator: reserve seats, then confirm with payment.
//!
//! Reservation and payment are split so that a slow or abandoned payment
//! never holds seats for longer than the lock TTL. A `Created` booking that
//! is never confirmed needs no cleanup: its locks simply expire.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use seatlock_core::config::BookingConfig;
use seatlock_core::traits::{LockStore, PaymentResult, PriceLookup};
use seatlock_core::types::{
    Booking, BookingId, BookingStatus, LockKey, Money, PaymentKind, SeatId, ShowId, UserId,
};

use crate::error::{BookingError, BookingResult};
use crate::payment::PaymentRegistry;
use crate::repository::BookingRepository;

/// Orchestrates multi-seat reservation and the reserve → confirm transaction.
#[derive(Debug, Clone)]
pub struct BookingCoordinator {
    /// Seat lock store.
    locks: Arc<dyn LockStore>,
    /// Seat price source.
    prices: Arc<dyn PriceLookup>,
    /// Payment kind → strategy.
    payments: PaymentRegistry,
    /// Booking records.
    bookings: BookingRepository,
    /// Default reservation TTL.
    lock_ttl: Duration,
}

impl BookingCoordinator {
    /// Create a coordinator.
    pub fn new(
        locks: Arc<dyn LockStore>,
        prices: Arc<dyn PriceLookup>,
        payments: PaymentRegistry,
        config: &BookingConfig,
    ) -> Self {
        Self {
            locks,
            prices,
            payments,
            bookings: BookingRepository::new(),
            lock_ttl: config.lock_ttl(),
        }
    }

    /// Reservation TTL used by [`create_booking`](Self::create_booking).
    pub fn lock_ttl(&self) -> Duration {
        self.lock_ttl
    }

    /// Current snapshot of a booking.
    pub fn get_booking(&self, id: BookingId) -> Option<Booking> {
        self.bookings.get(id)
    }

    /// Reserve `seat_ids` of `show_id` for `user_id` with the configured TTL.
    pub async fn create_booking(
        &self,
        user_id: &UserId,
        show_id: ShowId,
        seat_ids: &[SeatId],
    ) -> BookingResult<Booking> {
        self.create_booking_with_ttl(user_id, show_id, seat_ids, self.lock_ttl)
            .await
    }

    /// Reserve seats with an explicit TTL.
    ///
    /// Seats are locked in ascending order. If any seat is taken, every lock
    /// acquired by this call is released before `SeatUnavailable` is
    /// returned, leaving the store as if the call never happened.
    pub async fn create_booking_with_ttl(
        &self,
        user_id: &UserId,
        show_id: ShowId,
        seat_ids: &[SeatId],
        ttl: Duration,
    ) -> BookingResult<Booking> {
        let seats: BTreeSet<SeatId> = seat_ids.iter().copied().collect();
        if seats.is_empty() {
            return Err(BookingError::EmptySelection);
        }

        let owner = user_id.as_str();
        let mut held: Vec<LockKey> = Vec::with_capacity(seats.len());

        for seat_id in &seats {
            let key = LockKey::new(show_id, *seat_id);
            match self.locks.acquire(&key, owner, ttl).await {
                Ok(true) => held.push(key),
                Ok(false) => {
                    warn!(
                        user_id = %user_id,
                        show_id = %show_id,
                        seat_id = %seat_id,
                        "Seat already held, rolling back reservation"
                    );
                    self.roll_back(&held, owner).await;
                    return Err(BookingError::SeatUnavailable { seat_id: *seat_id });
                }
                Err(e) => {
                    self.roll_back(&held, owner).await;
                    return Err(e.into());
                }
            }
        }

        let amount = self.price_seats(show_id, &seats);
        let booking = Booking::new(user_id.clone(), show_id, seats, amount);
        self.bookings.insert(booking.clone());

        info!(
            booking_id = %booking.id,
            user_id = %user_id,
            show_id = %show_id,
            seats = booking.seat_ids.len(),
            amount = %amount,
            "Booking created"
        );
        Ok(booking)
    }

    /// Pay for a `Created` booking and release its seat locks.
    ///
    /// Fails without charging if any seat lock has lapsed or changed hands.
    /// A declined payment leaves the booking `Created` with its locks intact,
    /// so the caller may retry until the TTL runs out.
    pub async fn confirm_booking(
        &self,
        booking: &Booking,
        payment_kind: PaymentKind,
    ) -> BookingResult<Booking> {
        let claim = self.bookings.claim(booking.id)?;
        let current = claim.booking();
        let owner = current.user_id.as_str();

        let strategy =
            self.payments
                .get(payment_kind)
                .ok_or_else(|| BookingError::PaymentFailure {
                    booking_id: current.id,
                    reason: format!("unsupported payment kind {payment_kind}"),
                })?;

        for key in current.lock_keys() {
            let live = !self.locks.is_expired(&key).await?
                && self.locks.is_owned_by(&key, owner).await?;
            if !live {
                warn!(
                    booking_id = %current.id,
                    user_id = %current.user_id,
                    seat_id = %key.seat_id,
                    "Seat lock lost before confirmation"
                );
                return Err(BookingError::SeatUnavailable {
                    seat_id: key.seat_id,
                });
            }
        }

        if let PaymentResult::Declined { reason } = strategy.pay(current).await {
            warn!(
                booking_id = %current.id,
                payment_kind = %payment_kind,
                reason = %reason,
                "Payment declined"
            );
            return Err(BookingError::PaymentFailure {
                booking_id: current.id,
                reason,
            });
        }

        // The charge has gone through; a failed release only delays the seat
        // becoming free until its TTL.
        for key in current.lock_keys() {
            if let Err(e) = self.locks.release_if_owned(&key, owner).await {
                error!(
                    booking_id = %current.id,
                    seat_id = %key.seat_id,
                    error = %e,
                    "Failed to release seat lock after payment"
                );
            }
        }

        let confirmed = claim.finish(BookingStatus::Confirmed, Some(payment_kind));
        info!(
            booking_id = %confirmed.id,
            payment_kind = %payment_kind,
            "Booking confirmed"
        );
        Ok(confirmed)
    }

    /// Abandon a `Created` booking, freeing the seats it still holds.
    ///
    /// Seats whose locks already expired and were taken by another user are
    /// left alone.
    pub async fn cancel_booking(&self, booking: &Booking) -> BookingResult<Booking> {
        let claim = self.bookings.claim(booking.id)?;
        let current = claim.booking();
        let owner = current.user_id.as_str();

        let mut released = 0usize;
        for key in current.lock_keys() {
            if self.locks.release_if_owned(&key, owner).await? {
                released += 1;
            }
        }

        let cancelled = claim.finish(BookingStatus::Cancelled, None);
        info!(booking_id = %cancelled.id, released, "Booking cancelled");
        Ok(cancelled)
    }

    /// Release locks taken by a failed reservation, newest first.
    async fn roll_back(&self, held: &[LockKey], owner: &str) {
        for key in held.iter().rev() {
            match self.locks.release_if_owned(key, owner).await {
                Ok(_) => debug!(key = %key, owner, "Rolled back seat lock"),
                Err(e) => error!(
                    key = %key,
                    owner,
                    error = %e,
                    "Failed to roll back seat lock; it will expire on its own"
                ),
            }
        }
    }

    fn price_seats(&self, show_id: ShowId, seats: &BTreeSet<SeatId>) -> Money {
        seats
            .iter()
            .map(|seat_id| {
                self.prices.price(show_id, *seat_id).unwrap_or_else(|| {
                    warn!(show_id = %show_id, seat_id = %seat_id, "Seat has no price, counting zero");
                    Money::ZERO
                })
            })
            .sum()
    }
}
