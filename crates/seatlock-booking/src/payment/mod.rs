//! Payment strategies.
//!
//! Card and UPI charges are simulated and always approved. Real processors
//! plug in by implementing [`PaymentStrategy`](seatlock_core::traits::PaymentStrategy)
//! and registering with a [`PaymentRegistry`].

pub mod card;
pub mod registry;
pub mod upi;

pub use card::CardPayment;
pub use registry::PaymentRegistry;
pub use upi::UpiPayment;
