//! Core traits defined in `seatlock-core` and implemented by other crates.

pub mod lock_store;
pub mod payment;
pub mod pricing;

pub use lock_store::LockStore;
pub use payment::{PaymentResult, PaymentStrategy};
pub use pricing::PriceLookup;
