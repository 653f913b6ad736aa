//! Payment strategy trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{Booking, PaymentKind};

/// Outcome of charging a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentResult {
    /// The charge went through.
    Approved,
    /// The charge was refused.
    Declined {
        /// Reason for the decline.
        reason: String,
    },
}

impl PaymentResult {
    /// Whether the payment succeeded.
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// A pluggable way of charging a booking.
///
/// The coordinator only relies on the approve/decline outcome. Retrying a
/// declined booking calls `pay` again, so implementations that talk to a
/// real processor should be idempotent per booking id.
#[async_trait]
pub trait PaymentStrategy: Send + Sync + std::fmt::Debug + 'static {
    /// The payment kind this strategy handles.
    fn kind(&self) -> PaymentKind;

    /// Charge `booking.amount` to the booking's user.
    async fn pay(&self, booking: &Booking) -> PaymentResult;
}
