//! Redis-backed revocation denylist

use async_trait::async_trait;
use std::time::Duration;

use tf_core::errors::StoreError;
use tf_core::repositories::RevocationStore;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Revocation store on a shared Redis instance
///
/// Every service gating requests must point at the same Redis so that a
/// logout in one is visible to all.
#[derive(Clone)]
pub struct RedisRevocationStore {
    client: RedisClient,
}

impl RedisRevocationStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

/// Whole seconds for `SET ... EX`, which rejects zero
pub(crate) fn expiry_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

fn unavailable(err: InfrastructureError) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.client.exists(key).await.map_err(unavailable)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        match ttl {
            Some(ttl) => self
                .client
                .set_with_expiry(key, value, expiry_seconds(ttl))
                .await
                .map_err(unavailable),
            None => self.client.set(key, value).await.map_err(unavailable),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        match self.client.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(StoreError::Unavailable("unexpected PING reply".to_string())),
            Err(e) => Err(unavailable(e)),
        }
    }
}
