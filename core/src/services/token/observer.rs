//! Observation hooks for token lifecycle events.
//!
//! The token services report what they did through [`TokenObserver`]
//! instead of logging directly, so embedding services decide where events
//! go. Observers are the only place token failures get logged.

use std::time::Duration;
use uuid::Uuid;

use crate::domain::entities::token::VerifiedToken;
use crate::errors::TokenError;

/// Receives token lifecycle events
///
/// All methods default to doing nothing. Raw token strings are never
/// passed to observers.
pub trait TokenObserver: Send + Sync {
    fn token_issued(&self, _principal_id: Uuid, _role: &str, _expires_at: i64) {}

    fn token_admitted(&self, _verified: &VerifiedToken) {}

    /// A verification, revocation or signing attempt failed
    fn token_rejected(&self, _error: &TokenError) {}

    fn token_revoked(&self, _ttl: Option<Duration>) {}
}

/// Observer that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TokenObserver for NoopObserver {}

/// Observer that emits `tracing` events
///
/// Infrastructure failures are logged at error level; rejected credentials
/// are expected traffic and stay at debug.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TokenObserver for TracingObserver {
    fn token_issued(&self, principal_id: Uuid, role: &str, expires_at: i64) {
        tracing::info!(
            user_id = %principal_id,
            role = %role,
            expires_at,
            "Token issued"
        );
    }

    fn token_admitted(&self, verified: &VerifiedToken) {
        tracing::debug!(
            user_id = %verified.user_id,
            role = %verified.role,
            "Token admitted"
        );
    }

    fn token_rejected(&self, error: &TokenError) {
        if error.is_infrastructure() {
            tracing::error!(error = %error, "Token operation failed");
        } else {
            tracing::debug!(error = %error, "Token rejected");
        }
    }

    fn token_revoked(&self, ttl: Option<Duration>) {
        tracing::info!(
            ttl_seconds = ttl.map(|t| t.as_secs()),
            "Token revoked"
        );
    }
}
