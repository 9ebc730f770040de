use actix_web::{web, HttpResponse};
use tf_core::errors::{AuthError, DomainError};
use tf_shared::types::ApiResponse;

use crate::dto::auth::MeResponse;
use crate::handlers::error::ApiError;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for GET /me
///
/// Echoes the authenticated principal. Tokens may name principals that
/// this service has no account for, so the email is best effort.
pub async fn me(state: web::Data<AppState>, auth: AuthContext) -> Result<HttpResponse, ApiError> {
    let email = match state.auth_service.user(auth.user_id).await {
        Ok(user) => Some(user.email),
        Err(DomainError::Auth(AuthError::UserNotFound)) => None,
        Err(error) => return Err(error.into()),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(MeResponse {
        user_id: auth.user_id,
        role: auth.role,
        email,
    })))
}
