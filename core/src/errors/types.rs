//! Error taxonomies for token gatekeeping, credential flows and the
//! revocation store.

use thiserror::Error;

/// Failures of token issuance, verification and revocation
///
/// Every variant is terminal for the request it occurred in; nothing
/// here is retried by the component that raised it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Authorization header is required")]
    MissingCredential,

    #[error("Token has been revoked")]
    Revoked,

    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("Invalid token claims: {reason}")]
    MalformedClaims { reason: String },

    #[error("Token has expired")]
    Expired,

    #[error("Revocation store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    #[error("Token signing failed: {reason}")]
    SigningError { reason: String },
}

impl TokenError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        TokenError::InvalidToken {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        TokenError::MalformedClaims {
            reason: reason.into(),
        }
    }

    pub(crate) fn signing(reason: impl Into<String>) -> Self {
        TokenError::SigningError {
            reason: reason.into(),
        }
    }

    /// Infrastructure failures (store outage, signing misconfiguration)
    /// warrant an operational alert; the rest is expected auth traffic.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            TokenError::StoreUnavailable { .. } | TokenError::SigningError { .. }
        )
    }

    /// Message safe to show to clients; never carries internal details.
    pub fn public_message(&self) -> &'static str {
        match self {
            TokenError::MissingCredential => "Authorization header is required",
            TokenError::Revoked => "Token has been revoked",
            TokenError::InvalidToken { .. } => "Invalid token",
            TokenError::MalformedClaims { .. } => "Invalid token claims",
            TokenError::Expired => "Token has expired",
            TokenError::StoreUnavailable { .. } => "Service temporarily unavailable",
            TokenError::SigningError { .. } => "Internal server error",
        }
    }
}

/// Credential and registration failures of the authentication service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least {min_length} characters")]
    WeakPassword { min_length: usize },

    #[error("User with this email already exists")]
    UserAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,
}

/// Key-value store failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store operation timed out")]
    Timeout,
}

impl From<StoreError> for TokenError {
    fn from(err: StoreError) -> Self {
        TokenError::StoreUnavailable {
            reason: err.to_string(),
        }
    }
}
