pub mod auth;
pub mod health;

use std::sync::Arc;

use tf_core::services::AuthService;

/// Application state shared by all handlers
pub struct AppState {
    pub auth_service: Arc<AuthService>,
}
