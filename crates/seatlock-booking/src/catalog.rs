//! Seat price lookup table.

use std::collections::HashMap;
use std::fmt;

use seatlock_core::traits::PriceLookup;
use seatlock_core::types::{Money, SeatId, ShowId};

/// Kind of seat, which usually drives its price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeatType {
    /// Standard seat.
    Regular,
    /// Reclining premium seat.
    Recliner,
}

impl fmt::Display for SeatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regular => write!(f, "REGULAR"),
            Self::Recliner => write!(f, "RECLINER"),
        }
    }
}

/// A priced seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatInfo {
    /// Seat kind.
    pub seat_type: SeatType,
    /// Ticket price.
    pub price: Money,
}

/// Per-show seat layout with prices.
///
/// Built once at startup and read concurrently afterwards.
#[derive(Debug, Clone, Default)]
pub struct SeatCatalog {
    shows: HashMap<ShowId, HashMap<SeatId, SeatInfo>>,
}

impl SeatCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one seat of a show.
    pub fn add_seat(
        &mut self,
        show_id: ShowId,
        seat_id: SeatId,
        seat_type: SeatType,
        price: Money,
    ) -> &mut Self {
        self.shows
            .entry(show_id)
            .or_default()
            .insert(seat_id, SeatInfo { seat_type, price });
        self
    }

    /// Seat details, if the seat exists.
    pub fn seat(&self, show_id: ShowId, seat_id: SeatId) -> Option<SeatInfo> {
        self.shows.get(&show_id)?.get(&seat_id).copied()
    }
}

impl PriceLookup for SeatCatalog {
    fn price(&self, show_id: ShowId, seat_id: SeatId) -> Option<Money> {
        self.seat(show_id, seat_id).map(|info| info.price)
    }
}
