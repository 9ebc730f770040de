//! Business services containing domain logic and use cases.

pub mod auth;
pub mod clock;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use clock::{Clock, FixedClock, SystemClock};
pub use token::{
    extract_bearer, NoopObserver, TokenIssuer, TokenObserver, TokenRevoker, TokenVerifier,
    TracingObserver,
};
