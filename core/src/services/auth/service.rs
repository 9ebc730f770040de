//! Main authentication service implementation

use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;
use validator::ValidateEmail;

use tf_shared::types::{HealthResponse, ServiceHealth};

use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{RevocationStore, UserRepository};
use crate::services::token::{TokenIssuer, TokenRevoker};

use super::config::AuthServiceConfig;
use super::password::{hash_password, verify_password};

const SERVICE_NAME: &str = "auth-service";

/// Authentication service for registration, login and token lifecycle
pub struct AuthService {
    /// User repository for persistence
    user_repository: Arc<dyn UserRepository>,
    /// Revocation store, consulted for health only
    revocation_store: Arc<dyn RevocationStore>,
    /// Token issuer
    issuer: Arc<TokenIssuer>,
    /// Token revoker for logout
    revoker: Arc<TokenRevoker>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl AuthService {
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `revocation_store` - Shared denylist store
    /// * `issuer` - Token issuer
    /// * `revoker` - Token revoker
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        revocation_store: Arc<dyn RevocationStore>,
        issuer: Arc<TokenIssuer>,
        revoker: Arc<TokenRevoker>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            revocation_store,
            issuer,
            revoker,
            config,
        }
    }

    /// Register a new user and issue their first token
    ///
    /// # Returns
    ///
    /// * `Err(AuthError::InvalidEmail)` - Email is malformed
    /// * `Err(AuthError::WeakPassword)` - Password is too short
    /// * `Err(AuthError::UserAlreadyExists)` - Email already registered
    pub async fn register(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        if !self.config.allow_registration {
            return Err(DomainError::Validation {
                message: "Registration is currently disabled".to_string(),
            });
        }

        let email = normalize_email(email);
        if !email.validate_email() {
            return Err(AuthError::InvalidEmail.into());
        }
        if password.chars().count() < self.config.min_password_length {
            return Err(AuthError::WeakPassword {
                min_length: self.config.min_password_length,
            }
            .into());
        }

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = hash_password(password, self.config.bcrypt_cost).await?;
        let user = User::new(email, password_hash).with_role(self.config.default_role.clone());
        let user = self.user_repository.create(user).await?;

        let token = self.issuer.issue(user.id, &user.role)?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(AuthResponse::for_user(token, &user))
    }

    /// Authenticate with email and password
    ///
    /// Unknown emails and wrong passwords both yield `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);

        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login attempt for unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !verify_password(password, &user.password_hash).await? {
            tracing::warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.issuer.issue(user.id, &user.role)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(AuthResponse::for_user(token, &user))
    }

    /// Issue a fresh token for an already authenticated principal
    ///
    /// The presented token stays valid until it expires or is revoked.
    pub async fn refresh(&self, user_id: Uuid, role: &str) -> DomainResult<AuthResponse> {
        let token = self.issuer.issue(user_id, role)?;
        Ok(AuthResponse::new(token, user_id, None))
    }

    /// Revoke the presented token
    pub async fn logout(&self, token: &str) -> DomainResult<()> {
        self.revoker.revoke(token).await?;
        Ok(())
    }

    /// Look up a user by ID
    pub async fn user(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Check the user database and the revocation store
    pub async fn health(&self) -> HealthResponse {
        let mut dependencies = HashMap::new();

        let database = match self.user_repository.health_check().await {
            Ok(()) => ServiceHealth::healthy(),
            Err(e) => {
                tracing::error!(error = %e, "Database health check failed");
                ServiceHealth::unhealthy("database unreachable")
            }
        };
        dependencies.insert("database".to_string(), database);

        let store = match self.revocation_store.ping().await {
            Ok(()) => ServiceHealth::healthy(),
            Err(e) => {
                tracing::error!(error = %e, "Revocation store health check failed");
                ServiceHealth::unhealthy("revocation store unreachable")
            }
        };
        dependencies.insert("revocation_store".to_string(), store);

        HealthResponse::from_dependencies(SERVICE_NAME, dependencies)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
