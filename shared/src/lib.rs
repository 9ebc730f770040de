//! Shared configuration and common types for Taskflow services
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the process environment
//! - API response envelopes shared by every service

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, DatabaseConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
    RevocationTtl, ServerConfig,
};
pub use types::{ApiResponse, ErrorResponse, HealthResponse, HealthStatus, ServiceHealth};
