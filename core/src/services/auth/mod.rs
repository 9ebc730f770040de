//! Authentication service module
//!
//! Email/password registration and login on top of the token services:
//! - User registration with bcrypt password hashing
//! - Login with credential verification
//! - Token refresh and logout (revocation)
//! - Dependency health reporting

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::{AuthServiceConfig, MIN_PASSWORD_LENGTH};
pub use service::AuthService;
