//! Token issuance

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use tf_shared::config::JwtConfig;

use crate::domain::entities::token::TokenClaims;
use crate::errors::TokenError;
use crate::services::clock::Clock;

use super::observer::{TokenObserver, TracingObserver};

/// Mints HS256-signed tokens for authenticated principals
///
/// Stateless apart from the signing key; share it through `Arc`.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    lifetime: Duration,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn TokenObserver>,
}

impl TokenIssuer {
    /// Creates a new issuer
    ///
    /// # Arguments
    ///
    /// * `config` - JWT configuration holding the shared secret
    /// * `clock` - Time source for `iat`/`exp`
    ///
    /// # Returns
    ///
    /// * `Err(TokenError::SigningError)` - The secret is absent or empty
    pub fn new(config: &JwtConfig, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        let secret = config
            .secret()
            .ok_or_else(|| TokenError::signing("JWT secret is not configured"))?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            lifetime: Duration::from_secs(config.expiry_seconds.max(0).unsigned_abs()),
            clock,
            observer: Arc::new(TracingObserver),
        })
    }

    /// Replaces the default tracing observer
    pub fn with_observer(mut self, observer: Arc<dyn TokenObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Token lifetime in seconds
    pub fn expiry_seconds(&self) -> u64 {
        self.lifetime.as_secs()
    }

    /// Issues a signed token for `principal_id` carrying `role`
    ///
    /// Claims are `sub`, `role`, `iat = now` and `exp = now + lifetime`.
    /// No store is touched.
    pub fn issue(&self, principal_id: Uuid, role: &str) -> Result<String, TokenError> {
        let claims = TokenClaims::new(principal_id, role, self.clock.now(), self.lifetime);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                let error = TokenError::signing(e.to_string());
                self.observer.token_rejected(&error);
                error
            })?;

        self.observer.token_issued(principal_id, role, claims.exp);
        Ok(token)
    }
}
