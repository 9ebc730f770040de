//! Token verification (request gatekeeping)

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};

use tf_shared::config::AuthConfig;

use crate::domain::entities::token::{revocation_key, TokenClaims, VerifiedToken};
use crate::errors::{StoreError, TokenError};
use crate::repositories::RevocationStore;
use crate::services::clock::Clock;

use super::observer::{TokenObserver, TracingObserver};

const BEARER_SCHEME: &str = "Bearer";

const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Validates inbound credentials and extracts the principal
///
/// Verification runs in a fixed order: extract the bearer token, consult
/// the revocation denylist, check signature and structure, validate the
/// claims, then enforce expiry against the injected clock. The first
/// failing step decides the error.
///
/// Any HMAC algorithm (HS256, HS384, HS512) keyed with the shared secret is
/// admitted; headers naming `none` or an asymmetric algorithm are
/// `InvalidToken`. The `sub` claim must be a UUID string, so tokens minted
/// elsewhere with opaque subjects fail with `MalformedClaims`.
pub struct TokenVerifier {
    decoding_key: Option<DecodingKey>,
    validation: Validation,
    store: Arc<dyn RevocationStore>,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn TokenObserver>,
    lookup_timeout: Duration,
}

impl TokenVerifier {
    /// Creates a new verifier
    ///
    /// A missing secret does not fail here; every verification that gets
    /// past the revocation check then fails with `SigningError`.
    pub fn new(config: &AuthConfig, store: Arc<dyn RevocationStore>, clock: Arc<dyn Clock>) -> Self {
        let decoding_key = config
            .jwt
            .secret()
            .map(|secret| DecodingKey::from_secret(secret.as_bytes()));

        // Expiry is enforced against the injected clock, not by the library
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key,
            validation,
            store,
            clock,
            observer: Arc::new(TracingObserver),
            lookup_timeout: config.revocation.lookup_timeout(),
        }
    }

    /// Replaces the default tracing observer
    pub fn with_observer(mut self, observer: Arc<dyn TokenObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Verifies with the configured revocation lookup timeout as deadline
    pub async fn verify_header(&self, authorization: Option<&str>) -> Result<VerifiedToken, TokenError> {
        self.verify(authorization, Instant::now() + self.lookup_timeout)
            .await
    }

    /// Verifies an `Authorization` header value
    ///
    /// # Arguments
    ///
    /// * `authorization` - Raw header value, `None` if the header is absent
    /// * `deadline` - Point in time by which the revocation lookup must finish
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedToken)` - The admitted principal
    /// * `Err(TokenError::MalformedClaims)` - Claims are missing, mistyped,
    ///   or `sub` is not a UUID
    /// * `Err(TokenError)` - Otherwise the first check that failed
    pub async fn verify(
        &self,
        authorization: Option<&str>,
        deadline: Instant,
    ) -> Result<VerifiedToken, TokenError> {
        let result = self.run(authorization, deadline).await;
        match &result {
            Ok(verified) => self.observer.token_admitted(verified),
            Err(error) => self.observer.token_rejected(error),
        }
        result
    }

    async fn run(
        &self,
        authorization: Option<&str>,
        deadline: Instant,
    ) -> Result<VerifiedToken, TokenError> {
        let token = extract_bearer(authorization)?;

        self.check_revocation(token, deadline).await?;

        let decoding_key = self
            .decoding_key
            .as_ref()
            .ok_or_else(|| TokenError::signing("JWT secret is not configured"))?;

        let payload = decode::<serde_json::Value>(token, decoding_key, &self.validation)
            .map_err(|e| TokenError::invalid(format!("{:?}", e.kind())))?
            .claims;

        let claims = TokenClaims::try_from(payload)?;

        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        Ok(VerifiedToken {
            user_id: claims.principal_id()?,
            role: claims.role,
            token: token.to_string(),
            expires_at: claims.exp,
        })
    }

    async fn check_revocation(&self, token: &str, deadline: Instant) -> Result<(), TokenError> {
        let key = revocation_key(token);
        match timeout_at(deadline, self.store.exists(&key)).await {
            Ok(Ok(false)) => Ok(()),
            Ok(Ok(true)) => Err(TokenError::Revoked),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(StoreError::Timeout.into()),
        }
    }
}

/// Extracts the token from an `Authorization` header value
///
/// A leading `Bearer` scheme is stripped, then surrounding whitespace.
/// Headers without the scheme are taken as the bare token. Only presence
/// is checked here; the token's `sub` must still parse as a UUID during
/// verification.
pub fn extract_bearer(authorization: Option<&str>) -> Result<&str, TokenError> {
    let header = authorization.ok_or(TokenError::MissingCredential)?;
    let token = header.strip_prefix(BEARER_SCHEME).unwrap_or(header).trim();

    if token.is_empty() {
        return Err(TokenError::MissingCredential);
    }
    Ok(token)
}
