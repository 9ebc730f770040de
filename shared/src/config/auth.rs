//! Authentication and token revocation configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::env_or;

/// Default token lifetime: 24 hours
pub const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 86_400;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared HMAC secret; `None` when not configured
    #[serde(default, skip_serializing)]
    pub secret: Option<String>,

    /// Token lifetime in seconds, measured from issuance
    #[serde(default = "default_expiry_seconds")]
    pub expiry_seconds: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            expiry_seconds: default_expiry_seconds(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Self {
            secret,
            expiry_seconds: env_or("JWT_EXPIRY_SECONDS", DEFAULT_TOKEN_EXPIRY_SECONDS),
        }
    }

    /// Set token lifetime in hours
    pub fn with_expiry_hours(mut self, hours: i64) -> Self {
        self.expiry_seconds = hours * 3600;
        self
    }

    /// The configured secret, treating an empty string as absent
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref().filter(|s| !s.is_empty())
    }
}

/// How long a revocation record lives in the denylist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevocationTtl {
    /// Keep the record until the token's own expiry plus the retention grace
    UntilExpiry,
    /// Never expire records
    Unbounded,
}

impl Default for RevocationTtl {
    fn default() -> Self {
        RevocationTtl::UntilExpiry
    }
}

impl std::str::FromStr for RevocationTtl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "until_expiry" | "expiry" => Ok(RevocationTtl::UntilExpiry),
            "unbounded" | "none" => Ok(RevocationTtl::Unbounded),
            _ => Err(format!("Invalid revocation TTL policy: {}", s)),
        }
    }
}

/// Revocation denylist configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    /// Upper bound on a single denylist lookup, in milliseconds
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,

    /// Record TTL policy
    #[serde(default)]
    pub ttl: RevocationTtl,

    /// Extra seconds a record is kept past the token's expiry
    #[serde(default = "default_retention_seconds")]
    pub retention_seconds: u64,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_ms: default_lookup_timeout_ms(),
            ttl: RevocationTtl::default(),
            retention_seconds: default_retention_seconds(),
        }
    }
}

impl RevocationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            lookup_timeout_ms: env_or("REVOCATION_LOOKUP_TIMEOUT_MS", default_lookup_timeout_ms()),
            ttl: env_or("REVOCATION_TTL_POLICY", RevocationTtl::default()),
            retention_seconds: env_or("REVOCATION_RETENTION_SECONDS", default_retention_seconds()),
        }
    }

    /// Lookup timeout as a `Duration`
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    /// Retention grace as a `Duration`
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_seconds)
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Revocation configuration
    #[serde(default)]
    pub revocation: RevocationConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            revocation: RevocationConfig::from_env(),
        }
    }
}

fn default_expiry_seconds() -> i64 {
    DEFAULT_TOKEN_EXPIRY_SECONDS
}

fn default_lookup_timeout_ms() -> u64 {
    2000
}

fn default_retention_seconds() -> u64 {
    86_400
}
