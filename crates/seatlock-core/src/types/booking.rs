//! Booking model shared by the coordinator and payment strategies.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{BookingId, SeatId, ShowId, UserId};
use super::lock_key::LockKey;
use super::money::Money;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Seats are reserved; no payment has happened.
    Created,
    /// Payment succeeded and the seats are sold. Terminal.
    Confirmed,
    /// The reservation was abandoned explicitly. Terminal.
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "CREATED"),
            Self::Confirmed => write!(f, "CONFIRMED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Payment method selected at confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// Credit or debit card.
    Card,
    /// Unified Payments Interface transfer.
    Upi,
    /// Stored-value wallet.
    Wallet,
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card => write!(f, "CARD"),
            Self::Upi => write!(f, "UPI"),
            Self::Wallet => write!(f, "WALLET"),
        }
    }
}

/// A reservation of one or more seats of a show by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: BookingId,
    /// User holding the seat locks.
    pub user_id: UserId,
    /// Show the seats belong to.
    pub show_id: ShowId,
    /// Reserved seats, unique and ascending.
    pub seat_ids: BTreeSet<SeatId>,
    /// Sum of the seat prices.
    pub amount: Money,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// Payment kind, set once the booking is confirmed.
    pub payment_kind: Option<PaymentKind>,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Build a new booking in the `Created` state.
    pub fn new(
        user_id: UserId,
        show_id: ShowId,
        seat_ids: BTreeSet<SeatId>,
        amount: Money,
    ) -> Self {
        Self {
            id: BookingId::new(),
            user_id,
            show_id,
            seat_ids,
            amount,
            status: BookingStatus::Created,
            payment_kind: None,
            created_at: Utc::now(),
        }
    }

    /// Lock keys covering every seat of this booking, in acquisition order.
    pub fn lock_keys(&self) -> impl Iterator<Item = LockKey> + '_ {
        self.seat_ids
            .iter()
            .map(move |seat_id| LockKey::new(self.show_id, *seat_id))
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seats: Vec<String> = self.seat_ids.iter().map(ToString::to_string).collect();
        write!(
            f,
            "Booking {} (user {}, show {}, seats [{}], amount {}, status {}",
            self.id,
            self.user_id,
            self.show_id,
            seats.join(", "),
            self.amount,
            self.status,
        )?;
        if let Some(kind) = self.payment_kind {
            write!(f, ", paid by {kind}")?;
        }
        write!(f, ")")
    }
}
