//! Unit tests for the Redis revocation store

use std::time::Duration;

use tf_core::domain::entities::token::{revocation_key, REVOKED_MARKER};
use tf_core::repositories::RevocationStore;

use crate::cache::revocation_store::expiry_seconds;
use crate::cache::{RedisClient, RedisRevocationStore};
use crate::config::CacheConfig;

#[test]
fn test_expiry_seconds_never_zero() {
    assert_eq!(expiry_seconds(Duration::from_millis(10)), 1);
    assert_eq!(expiry_seconds(Duration::from_secs(172_800)), 172_800);
}

async fn store() -> RedisRevocationStore {
    let config = CacheConfig {
        connect_retries: 1,
        ..CacheConfig::new(
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        )
    };
    RedisRevocationStore::new(RedisClient::new(&config).await.unwrap())
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_revocation_record_round_trip() {
    let store = store().await;
    let key = revocation_key(&format!("test-token-{}", uuid::Uuid::new_v4()));

    assert!(!store.exists(&key).await.unwrap());
    store
        .set(&key, REVOKED_MARKER, Some(Duration::from_secs(30)))
        .await
        .unwrap();
    assert!(store.exists(&key).await.unwrap());

    // Idempotent rewrite
    store
        .set(&key, REVOKED_MARKER, Some(Duration::from_secs(30)))
        .await
        .unwrap();
    assert!(store.exists(&key).await.unwrap());
    assert!(store.ping().await.is_ok());
}
