//! Redis cache client implementation
//!
//! This module provides a Redis client with connection retry, command retry
//! and the basic operations the denylist needs: existence checks, writes
//! with and without expiry, TTL inspection and health checks.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::CacheConfig;
use crate::InfrastructureError;

/// Base delay between command retries
const COMMAND_RETRY_DELAY_MS: u64 = 50;

/// Upper bound for any single backoff step
const MAX_BACKOFF_MS: u64 = 5000;

/// Redis client with retry logic
///
/// Wraps a multiplexed connection, which is cheap to clone and safe to
/// share across request handlers.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Maximum number of attempts per command
    max_retries: u32,
    /// Base delay between command retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Connect using the configured startup retry policy
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Redis client or error
    pub async fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            config.connect_retries.max(1),
            config.retry_delay_ms,
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            max_retries: config.command_retries.max(1),
            retry_delay_ms: COMMAND_RETRY_DELAY_MS,
        })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut delay = retry_delay_ms;
        let mut attempt: u32 = 1;

        loop {
            match client.get_multiplexed_async_connection().await {
                Ok(connection) => {
                    debug!(attempt, "Redis connection established");
                    return Ok(connection);
                }
                Err(e) if attempt < max_retries => {
                    warn!(attempt, max_retries, delay_ms = delay, error = %e, "Redis connect failed, retrying");
                    sleep(Duration::from_millis(delay)).await;
                    delay = next_backoff(delay);
                    attempt += 1;
                }
                Err(e) => {
                    error!(attempts = attempt, error = %e, "Giving up on Redis connection");
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Set a value without expiry
    pub async fn set(&self, key: &str, value: &str) -> Result<(), InfrastructureError> {
        debug!("Setting key without expiry");

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            let value = value.to_string();

            Box::pin(async move { conn.set::<_, _, ()>(key, value).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to set key: {}", e);
            InfrastructureError::Cache(e)
        })
    }

    /// Set a value with expiration time
    ///
    /// # Arguments
    /// * `key` - Cache key
    /// * `value` - Value to store
    /// * `expiry_seconds` - Time to live in seconds
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!("Setting key with expiry {}s", expiry_seconds);

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            let value = value.to_string();

            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to set key with expiry: {}", e);
            InfrastructureError::Cache(e)
        })
    }

    /// Check if a key exists
    ///
    /// Keys are never logged; denylist keys embed bearer tokens.
    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        self.execute_with_retry(|mut conn| {
            let key = key.to_string();

            Box::pin(async move { conn.exists::<_, bool>(key).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to check key existence: {}", e);
            InfrastructureError::Cache(e)
        })
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let result = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await;

        match result {
            Ok(response) if response == "PONG" => Ok(true),
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    /// Execute a Redis operation with automatic retry logic
    ///
    /// Only transient errors are retried, with exponential backoff.
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(
            MultiplexedConnection,
        ) -> std::pin::Pin<Box<dyn std::future::Future<Output = RedisResult<T>> + Send>>,
    {
        let mut delay = self.retry_delay_ms;
        let mut attempt = 1;

        loop {
            match operation(self.connection.clone()).await {
                Err(e) if attempt < self.max_retries && is_retriable_error(&e) => {
                    warn!(attempt, delay_ms = delay, error = %e, "Transient Redis error, retrying");
                    sleep(Duration::from_millis(delay)).await;
                    delay = next_backoff(delay);
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }
}

fn next_backoff(delay_ms: u64) -> u64 {
    delay_ms.saturating_mul(2).min(MAX_BACKOFF_MS)
}

/// Check if a Redis error is transient and worth retrying
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.rfind('@'), url.find("://")) {
        if at_pos > proto_end {
            return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
        }
    }
    url.to_string()
}
