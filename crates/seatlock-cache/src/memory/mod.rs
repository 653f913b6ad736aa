//! In-process lock store.

pub mod store;

pub use store::MemoryLockStore;
