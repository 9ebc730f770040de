use actix_web::{web, HttpResponse};
use tf_shared::types::ApiResponse;

use crate::dto::auth::LogoutResponse;
use crate::handlers::error::ApiError;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for POST /logout
///
/// Revokes the presented token. Requires authentication via Bearer token
/// in the Authorization header.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {"success": true, "data": {"message": "Successfully logged out"}}
/// ```
///
/// ## Errors
/// - 401 Unauthorized: missing, invalid, expired or already revoked token
/// - 503 Service Unavailable: the revocation store could not be written
pub async fn logout(
    state: web::Data<AppState>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    state.auth_service.logout(&auth.token).await?;

    tracing::info!(user_id = %auth.user_id, "User logged out");
    Ok(HttpResponse::Ok().json(ApiResponse::success(LogoutResponse {
        message: "Successfully logged out".to_string(),
    })))
}
