//! Configuration for the authentication service

use crate::domain::entities::token::DEFAULT_ROLE;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Minimum password length accepted at registration
    pub min_password_length: usize,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Role given to newly registered users
    pub default_role: String,
    /// Whether to allow registration of new users
    pub allow_registration: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            min_password_length: MIN_PASSWORD_LENGTH,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            default_role: DEFAULT_ROLE.to_string(),
            allow_registration: true,
        }
    }
}

impl AuthServiceConfig {
    /// Cheapest bcrypt cost, for tests
    pub fn fast_hashing(mut self) -> Self {
        self.bcrypt_cost = 4;
        self
    }
}
