//! Core type definitions used across the SeatLock workspace.

pub mod booking;
pub mod id;
pub mod lock_key;
pub mod money;

pub use booking::{Booking, BookingStatus, PaymentKind};
pub use id::*;
pub use lock_key::LockKey;
pub use money::Money;
