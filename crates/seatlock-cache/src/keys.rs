//! Key builders for lock entries stored in a shared backend.
//!
//! The Redis store adds its configured prefix on top of these.

use seatlock_core::types::LockKey;

/// Key for the lock on one seat of a show.
pub fn seat_lock(key: &LockKey) -> String {
    format!("lock:{key}")
}
