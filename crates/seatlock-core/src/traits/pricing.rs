//! Read-only seat price lookup.

use crate::types::{Money, SeatId, ShowId};

/// Catalog query used to price a booking.
pub trait PriceLookup: Send + Sync + std::fmt::Debug + 'static {
    /// Price of one seat of a show, or `None` if the seat is unknown.
    fn price(&self, show_id: ShowId, seat_id: SeatId) -> Option<Money>;
}
