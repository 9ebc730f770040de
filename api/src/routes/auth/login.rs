use actix_web::{web, HttpResponse};
use tf_shared::types::ApiResponse;
use validator::Validate;

use crate::dto::auth::{first_validation_message, LoginRequest, TokenResponse};
use crate::handlers::error::ApiError;
use crate::routes::AppState;

/// Handler for POST /login
///
/// Unknown emails and wrong passwords are indistinguishable to the
/// caller: both answer 400 "Invalid credentials".
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()
        .map_err(|errors| ApiError::BadRequest(first_validation_message(&errors)))?;

    let response = state.auth_service.login(&body.email, &body.password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(TokenResponse::from(response))))
}
