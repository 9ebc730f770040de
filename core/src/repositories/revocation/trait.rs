//! Revocation store trait defining the interface to the shared denylist.
//!
//! The store is a plain key-value service shared by every process that
//! gates requests. Keys and values are opaque strings; the denylist key
//! scheme lives in [`crate::domain::entities::token::revocation_key`].

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::StoreError;

/// Key-value operations needed for token revocation
///
/// Implementations must be safe to share across request handlers.
/// Callers bound every call with their own deadline, so implementations
/// should not add unbounded internal retries.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Check whether `key` is present
    ///
    /// # Returns
    /// * `Ok(true)` - Key exists
    /// * `Ok(false)` - Key is absent or has expired
    /// * `Err(StoreError)` - The store could not be consulted
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Write `value` under `key`, overwriting any previous value
    ///
    /// # Arguments
    /// * `key` - Store key
    /// * `value` - Value to store
    /// * `ttl` - Time to live, `None` for a record that never expires
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError>;

    /// Check connectivity
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
