//! Token service module for JWT gatekeeping
//!
//! This module handles all token-related operations:
//! - Issuing HS256 tokens for authenticated principals
//! - Verifying inbound credentials against the revocation denylist
//! - Revoking tokens on logout
//! - Observation hooks for lifecycle events

mod issuer;
mod observer;
mod revocation;
mod verifier;

#[cfg(test)]
mod tests;

pub use issuer::TokenIssuer;
pub use observer::{NoopObserver, TokenObserver, TracingObserver};
pub use revocation::TokenRevoker;
pub use verifier::{extract_bearer, TokenVerifier};
