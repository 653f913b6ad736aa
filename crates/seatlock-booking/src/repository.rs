//! In-memory booking records.
//!
//! The repository is the authority for a booking's status. Callers hold
//! [`Booking`] snapshots; every transition is decided against the stored
//! record.

use std::sync::Arc;

use dashmap::DashMap;

use seatlock_core::types::{Booking, BookingId, BookingStatus, PaymentKind};

use crate::error::{BookingError, BookingResult};

#[derive(Debug)]
struct BookingEntry {
    booking: Booking,
    /// Set while a confirmation or cancellation is in flight.
    claimed: bool,
}

/// Thread-safe store of bookings keyed by id.
#[derive(Debug, Clone, Default)]
pub struct BookingRepository {
    entries: Arc<DashMap<BookingId, BookingEntry>>,
}

impl BookingRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly created booking.
    pub fn insert(&self, booking: Booking) {
        self.entries.insert(
            booking.id,
            BookingEntry {
                booking,
                claimed: false,
            },
        );
    }

    /// Current snapshot of a booking.
    pub fn get(&self, id: BookingId) -> Option<Booking> {
        self.entries.get(&id).map(|entry| entry.booking.clone())
    }

    /// Whether no bookings are recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Atomically take exclusive rights to transition a `Created` booking.
    ///
    /// The claim is released when the returned guard is dropped, unless
    /// [`BookingClaim::finish`] was called.
    pub fn claim(&self, id: BookingId) -> BookingResult<BookingClaim<'_>> {
        let mut entry = self
            .entries
            .get_mut(&id)
            .ok_or(BookingError::NotFound { booking_id: id })?;

        if entry.booking.status != BookingStatus::Created {
            return Err(BookingError::InvalidState {
                booking_id: id,
                status: entry.booking.status,
            });
        }
        if entry.claimed {
            return Err(BookingError::ConfirmationInProgress { booking_id: id });
        }

        entry.claimed = true;
        let booking = entry.booking.clone();

        Ok(BookingClaim {
            repo: self,
            booking,
            armed: true,
        })
    }

    fn unclaim(&self, id: BookingId) {
        if let Some(mut entry) = self.entries.get_mut(&id) {
            entry.claimed = false;
        }
    }

    fn complete(
        &self,
        id: BookingId,
        status: BookingStatus,
        payment_kind: Option<PaymentKind>,
    ) -> Option<Booking> {
        self.entries.get_mut(&id).map(|mut entry| {
            entry.booking.status = status;
            if payment_kind.is_some() {
                entry.booking.payment_kind = payment_kind;
            }
            entry.claimed = false;
            entry.booking.clone()
        })
    }
}

/// Exclusive right to move one booking out of `Created`.
#[derive(Debug)]
pub struct BookingClaim<'a> {
    repo: &'a BookingRepository,
    booking: Booking,
    armed: bool,
}

impl BookingClaim<'_> {
    /// Snapshot of the booking taken when the claim was granted.
    pub fn booking(&self) -> &Booking {
        &self.booking
    }

    /// Apply the terminal transition and release the claim.
    pub fn finish(mut self, status: BookingStatus, payment_kind: Option<PaymentKind>) -> Booking {
        self.armed = false;
        let mut updated = self.booking.clone();
        updated.status = status;
        if payment_kind.is_some() {
            updated.payment_kind = payment_kind;
        }
        self.repo
            .complete(self.booking.id, status, payment_kind)
            .unwrap_or(updated)
    }
}

impl Drop for BookingClaim<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.repo.unclaim(self.booking.id);
        }
    }
}
