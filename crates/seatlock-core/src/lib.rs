//! # seatlock-core
//!
//! Core crate for SeatLock. Contains the lock store and payment traits,
//! configuration schemas, typed identifiers, the booking model,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other SeatLock crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
