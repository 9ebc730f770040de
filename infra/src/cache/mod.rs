//! Cache module for Redis-backed state
//!
//! Provides the Redis client (connection setup, retries, basic commands)
//! and the revocation denylist store built on it.

pub mod redis_client;
pub mod revocation_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationStore;

// Re-export commonly used types
pub use tf_shared::config::CacheConfig;
