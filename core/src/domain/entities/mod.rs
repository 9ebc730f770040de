//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{
    revocation_key, TokenClaims, VerifiedToken,
    DEFAULT_ROLE, REVOCATION_KEY_PREFIX, REVOKED_MARKER,
};
pub use user::User;
