//! Redis lock store.

pub mod client;
pub mod operations;

pub use operations::RedisLockStore;
