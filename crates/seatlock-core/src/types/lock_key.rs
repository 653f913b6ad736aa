//! Composite key identifying one lockable seat.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::{SeatId, ShowId};

/// A `(show, seat)` pair.
///
/// Ordering is by show first, then seat, which gives every multi-seat
/// request the same acquisition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LockKey {
    /// Show the seat belongs to.
    pub show_id: ShowId,
    /// Seat within the show.
    pub seat_id: SeatId,
}

impl LockKey {
    /// Build a key for a seat of a show.
    pub fn new(show_id: ShowId, seat_id: SeatId) -> Self {
        Self { show_id, seat_id }
    }
}

impl fmt::Display for LockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "show:{}:seat:{}", self.show_id, self.seat_id)
    }
}
