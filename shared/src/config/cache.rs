//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Redis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection attempts made at startup before giving up
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,

    /// Base delay between connection attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Attempts per command for transient failures
    #[serde(default = "default_command_retries")]
    pub command_retries: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://redis:6379"),
            connect_retries: default_connect_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            command_retries: default_command_retries(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "redis://redis:6379".to_string());

        Self {
            url,
            connect_retries: env_or("REDIS_CONNECT_RETRIES", default_connect_retries()),
            ..Default::default()
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

fn default_connect_retries() -> u32 {
    10
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_command_retries() -> u32 {
    2
}
