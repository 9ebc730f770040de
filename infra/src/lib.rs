//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Taskflow services,
//! following Clean Architecture principles. It provides concrete
//! implementations of the core repository and store traits.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: PostgreSQL user repository using SQLx
//! - **Cache**: Redis client and the revocation denylist store

// Re-export core types for convenience
pub use tf_core::errors::*;

/// Database module - PostgreSQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and operations
pub mod cache;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration for infrastructure services
    //!
    //! Connection settings are owned by the shared crate; this module
    //! groups them for the infrastructure layer.

    use serde::{Deserialize, Serialize};

    pub use tf_shared::config::{CacheConfig, DatabaseConfig};

    /// Infrastructure configuration settings
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct InfrastructureConfig {
        /// Database configuration
        pub database: DatabaseConfig,
        /// Redis configuration
        pub cache: CacheConfig,
    }

    impl InfrastructureConfig {
        /// Load from environment variables, reading `.env` if present
        pub fn from_env() -> Self {
            dotenvy::dotenv().ok();
            Self {
                database: DatabaseConfig::from_env(),
                cache: CacheConfig::from_env(),
            }
        }
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(e) => DomainError::database(e.to_string()),
            other => DomainError::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = config::InfrastructureConfig::default();
        assert!(config.database.url.starts_with("postgres://"));
        assert!(config.database.max_connections > 0);
        assert_eq!(config.cache.url, "redis://redis:6379");
    }

    #[test]
    fn test_infrastructure_error_into_domain() {
        let err: DomainError = InfrastructureError::Config("bad url".to_string()).into();
        assert!(matches!(err, DomainError::Internal { .. }));
    }
}
