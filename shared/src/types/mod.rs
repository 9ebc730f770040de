//! Type definitions shared by every service
//!
//! - `response` - API response envelopes and health checks

pub mod response;

pub use response::{ApiResponse, ErrorResponse, HealthResponse, HealthStatus, ServiceHealth};
