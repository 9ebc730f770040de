//! Token entities for JWT-based gatekeeping.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use uuid::Uuid;

use crate::errors::TokenError;

/// Key prefix of revocation records in the shared store
pub const REVOCATION_KEY_PREFIX: &str = "blacklist:";

/// Value written for every revocation record
pub const REVOKED_MARKER: &str = "revoked";

/// Default role assigned to newly registered principals
pub const DEFAULT_ROLE: &str = "user";

/// Builds the store key under which `token` is denylisted
///
/// The token string is used verbatim; no normalization is applied.
pub fn revocation_key(token: &str) -> String {
    format!("{}{}", REVOCATION_KEY_PREFIX, token)
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (principal ID)
    pub sub: String,

    /// Role label ("user", "admin", ...)
    pub role: String,

    /// Issued at timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration timestamp
    pub exp: i64,
}

impl TokenClaims {
    /// Creates claims for a freshly issued token
    ///
    /// # Arguments
    ///
    /// * `principal_id` - The principal's UUID
    /// * `role` - Role label embedded verbatim
    /// * `issued_at` - Issuance time in seconds since epoch
    /// * `lifetime` - Validity window measured from `issued_at`
    pub fn new(principal_id: Uuid, role: impl Into<String>, issued_at: i64, lifetime: Duration) -> Self {
        let lifetime = i64::try_from(lifetime.as_secs()).unwrap_or(i64::MAX);
        Self {
            sub: principal_id.to_string(),
            role: role.into(),
            iat: Some(issued_at),
            exp: issued_at.saturating_add(lifetime),
        }
    }

    /// Parses the subject as a principal UUID
    pub fn principal_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| TokenError::malformed("subject is not a valid principal id"))
    }

    /// A token is expired strictly after its `exp` second
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.exp
    }

    /// Seconds of validity left at `now`, zero once expired
    pub fn remaining_at(&self, now: i64) -> i64 {
        (self.exp - now).max(0)
    }
}

impl TryFrom<Value> for TokenClaims {
    type Error = TokenError;

    /// Validates a decoded payload into typed claims
    ///
    /// `sub` falls back to the legacy `user_id` claim. `exp` may be an
    /// integer or a float (fractional seconds are truncated).
    fn try_from(payload: Value) -> Result<Self, Self::Error> {
        let map = match payload {
            Value::Object(map) => map,
            _ => return Err(TokenError::malformed("payload is not a JSON object")),
        };

        let sub = string_claim(&map, "sub")
            .or_else(|| string_claim(&map, "user_id"))
            .ok_or_else(|| TokenError::malformed("missing or non-string subject"))?;

        let role = string_claim(&map, "role")
            .ok_or_else(|| TokenError::malformed("missing or non-string role"))?;

        let exp = numeric_claim(&map, "exp")
            .ok_or_else(|| TokenError::malformed("missing or non-numeric exp"))?;

        let iat = numeric_claim(&map, "iat");

        let claims = Self { sub, role, iat, exp };
        claims.principal_id()?;
        Ok(claims)
    }
}

fn string_claim(map: &Map<String, Value>, name: &str) -> Option<String> {
    map.get(name).and_then(Value::as_str).map(str::to_owned)
}

fn numeric_claim(map: &Map<String, Value>, name: &str) -> Option<i64> {
    let value = map.get(name)?;
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}

/// Identity admitted by the gatekeeper
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedToken {
    /// Principal ID from the `sub` claim
    pub user_id: Uuid,

    /// Role label from the `role` claim
    pub role: String,

    /// The raw token exactly as presented
    #[serde(skip_serializing)]
    pub token: String,

    /// Expiration timestamp
    pub expires_at: i64,
}
