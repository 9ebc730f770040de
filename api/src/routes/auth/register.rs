use actix_web::{web, HttpResponse};
use tf_shared::types::ApiResponse;
use validator::Validate;

use crate::dto::auth::{first_validation_message, RegisterRequest, TokenResponse};
use crate::handlers::error::ApiError;
use crate::routes::AppState;

/// Handler for POST /register
///
/// Creates an account and returns its first token.
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {"success": true, "data": {"token": "...", "user_id": "...", "email": "ada@example.com"}}
/// ```
///
/// ## Errors
/// - 400 Bad Request: invalid email, short password, or email already registered
/// - 500 Internal Server Error: hashing, storage or signing failure
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()
        .map_err(|errors| ApiError::BadRequest(first_validation_message(&errors)))?;

    let response = state
        .auth_service
        .register(&body.email, &body.password)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(TokenResponse::from(response))))
}
