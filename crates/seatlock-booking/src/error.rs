//! Typed booking failures.

use thiserror::Error;

use seatlock_core::error::{AppError, ErrorKind};
use seatlock_core::types::{BookingId, BookingStatus, SeatId};

/// Result alias for coordinator operations.
pub type BookingResult<T> = Result<T, BookingError>;

/// Why a booking operation failed.
#[derive(Debug, Error)]
pub enum BookingError {
    /// A requested seat is held by someone else, or a held lock has lapsed.
    #[error("Seat {seat_id} is not available")]
    SeatUnavailable {
        /// The first seat that could not be locked or is no longer held.
        seat_id: SeatId,
    },

    /// The booking is not in the `Created` state.
    #[error("Booking {booking_id} is {status}, expected CREATED")]
    InvalidState {
        /// Booking in question.
        booking_id: BookingId,
        /// Its current status.
        status: BookingStatus,
    },

    /// Another confirmation or cancellation of the same booking is running.
    #[error("Booking {booking_id} is already being processed")]
    ConfirmationInProgress {
        /// Booking in question.
        booking_id: BookingId,
    },

    /// The payment strategy declined, or no strategy handles the kind.
    #[error("Payment for booking {booking_id} failed: {reason}")]
    PaymentFailure {
        /// Booking in question.
        booking_id: BookingId,
        /// Decline reason.
        reason: String,
    },

    /// The booking is unknown to this coordinator.
    #[error("Booking {booking_id} not found")]
    NotFound {
        /// Booking in question.
        booking_id: BookingId,
    },

    /// No seats were requested.
    #[error("A booking needs at least one seat")]
    EmptySelection,

    /// The lock store backend failed.
    #[error(transparent)]
    Backend(#[from] AppError),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let kind = match &err {
            BookingError::SeatUnavailable { .. }
            | BookingError::InvalidState { .. }
            | BookingError::ConfirmationInProgress { .. } => ErrorKind::Conflict,
            BookingError::PaymentFailure { .. } => ErrorKind::PaymentFailure,
            BookingError::NotFound { .. } => ErrorKind::NotFound,
            BookingError::EmptySelection => ErrorKind::Validation,
            BookingError::Backend(_) => ErrorKind::Cache,
        };
        match err {
            BookingError::Backend(inner) => inner,
            other => AppError::new(kind, other.to_string()),
        }
    }
}
