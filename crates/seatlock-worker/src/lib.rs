//! Background tasks for SeatLock.
//!
//! Currently a single periodic task: the [`ExpirySweeper`], which drops
//! expired seat locks so the lock store does not grow without bound.
//! Correctness never depends on it running.

pub mod sweeper;

pub use sweeper::ExpirySweeper;
