//! Key-value store adapters with per-key expiry

pub mod redis_store;
pub mod memory_store;
pub mod sweeper;

pub use redis_store::RedisStore;
pub use memory_store::MemoryStore;
pub use sweeper::{spawn_sweeper, SweeperHandle};
