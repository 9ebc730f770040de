//! Domain layer containing business entities and value objects.

pub mod entities;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::{
    revocation_key, TokenClaims, User, VerifiedToken, DEFAULT_ROLE, REVOCATION_KEY_PREFIX,
    REVOKED_MARKER,
};
pub use value_objects::AuthResponse;
