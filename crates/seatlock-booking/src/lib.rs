//! # seatlock-booking
//!
//! Two-phase seat booking on top of a [`LockStore`](seatlock_core::traits::LockStore).
//!
//! ## Modules
//!
//! - `coordinator`: all-or-nothing seat reservation, confirmation and cancellation
//! - `repository`: in-memory booking records with an atomic confirmation claim
//! - `payment`: built-in payment strategies and the kind → strategy registry
//! - `catalog`: seat price lookup table
//! - `error`: typed booking failures

pub mod catalog;
pub mod coordinator;
pub mod error;
pub mod payment;
pub mod repository;

pub use catalog::{SeatCatalog, SeatInfo, SeatType};
pub use coordinator::BookingCoordinator;
pub use error::{BookingError, BookingResult};
pub use payment::PaymentRegistry;
pub use repository::BookingRepository;
