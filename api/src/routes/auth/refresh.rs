use actix_web::{web, HttpResponse};
use tf_shared::types::ApiResponse;

use crate::dto::auth::RefreshResponse;
use crate::handlers::error::ApiError;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for POST /refresh
///
/// Issues a new token for the authenticated principal, keeping its role.
/// The presented token is left untouched.
pub async fn refresh(
    state: web::Data<AppState>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let response = state.auth_service.refresh(auth.user_id, &auth.role).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(RefreshResponse {
        token: response.token,
        user_id: response.user_id,
    })))
}
