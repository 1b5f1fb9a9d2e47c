//! KV backend implementations.

mod memory;

#[cfg(feature = "redis")]
mod redis;

pub use memory::InMemoryKv;

#[cfg(feature = "redis")]
pub use redis::{RedisConfig, RedisKv};
