//! # Taskflow Core
//!
//! Core business logic and domain layer for the Taskflow services.
//! This crate contains the token gatekeeping contract shared by every
//! service (issuance, verification, revocation), the authentication
//! service built on it, repository interfaces and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{revocation_key, AuthResponse, TokenClaims, User, VerifiedToken};
pub use errors::{AuthError, DomainError, DomainResult, StoreError, TokenError};
pub use repositories::{InMemoryRevocationStore, InMemoryUserRepository, RevocationStore, UserRepository};
pub use services::{
    extract_bearer, AuthService, AuthServiceConfig, Clock, FixedClock, NoopObserver, SystemClock,
    TokenIssuer, TokenObserver, TokenRevoker, TokenVerifier, TracingObserver,
};
