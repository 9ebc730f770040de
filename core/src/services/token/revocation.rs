//! Token revocation (logout)

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::sync::Arc;
use std::time::Duration;

use tf_shared::config::{RevocationConfig, RevocationTtl};

use crate::domain::entities::token::{revocation_key, TokenClaims, REVOKED_MARKER};
use crate::errors::TokenError;
use crate::repositories::RevocationStore;
use crate::services::clock::Clock;

use super::observer::{TokenObserver, TracingObserver};

/// Writes denylist records for tokens
pub struct TokenRevoker {
    store: Arc<dyn RevocationStore>,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn TokenObserver>,
    ttl_policy: RevocationTtl,
    retention: Duration,
}

impl TokenRevoker {
    pub fn new(config: &RevocationConfig, store: Arc<dyn RevocationStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            observer: Arc::new(TracingObserver),
            ttl_policy: config.ttl,
            retention: config.retention(),
        }
    }

    /// Replaces the default tracing observer
    pub fn with_observer(mut self, observer: Arc<dyn TokenObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Denylists `token`
    ///
    /// The token is not validated; any string may be revoked. Revoking the
    /// same token again rewrites the same record.
    ///
    /// # Returns
    ///
    /// * `Err(TokenError::StoreUnavailable)` - The record could not be written
    pub async fn revoke(&self, token: &str) -> Result<(), TokenError> {
        let ttl = self.record_ttl(token);

        self.store
            .set(&revocation_key(token), REVOKED_MARKER, ttl)
            .await
            .map_err(|e| {
                let error = TokenError::from(e);
                self.observer.token_rejected(&error);
                error
            })?;

        self.observer.token_revoked(ttl);
        Ok(())
    }

    /// Lifetime of the denylist record for `token`
    ///
    /// Under `UntilExpiry` the record outlives the token by the retention
    /// grace; tokens whose `exp` cannot be read get the grace alone.
    pub fn record_ttl(&self, token: &str) -> Option<Duration> {
        match self.ttl_policy {
            RevocationTtl::Unbounded => None,
            RevocationTtl::UntilExpiry => {
                let remaining = peek_claims(token)
                    .map(|claims| claims.remaining_at(self.clock.now()).unsigned_abs())
                    .unwrap_or(0);
                let ttl = self.retention + Duration::from_secs(remaining);
                Some(ttl.max(Duration::from_secs(1)))
            }
        }
    }
}

/// Reads claims without checking the signature
///
/// Only used to size the denylist TTL; never for admission decisions.
fn peek_claims(token: &str) -> Option<TokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let payload = decode::<serde_json::Value>(token, &DecodingKey::from_secret(&[]), &validation)
        .ok()?
        .claims;
    TokenClaims::try_from(payload).ok()
}
