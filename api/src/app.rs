//! Application factory
//!
//! Wires the auth routes, the gatekeeping middleware on protected
//! resources, and the app-wide security headers and request tracing.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use tf_core::services::TokenVerifier;
use tracing_actix_web::TracingLogger;

use crate::handlers::error::ApiError;
use crate::middleware::{auth::JwtAuth, security::SecurityHeaders};
use crate::routes::{auth, health::health, AppState};

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
    verifier: Arc<TokenVerifier>,
    security: SecurityHeaders,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let gatekeeper = JwtAuth::new(verifier);

    App::new()
        .app_data(state)
        .app_data(json_config())
        // Registration order is inverse of execution: tracing sees the
        // final response, security headers included.
        .wrap(security)
        .wrap(TracingLogger::default())
        // Public routes
        .route("/register", web::post().to(auth::register))
        .route("/login", web::post().to(auth::login))
        .route("/health", web::get().to(health))
        // Protected routes
        .service(
            web::resource("/logout")
                .wrap(gatekeeper.clone())
                .route(web::post().to(auth::logout)),
        )
        .service(
            web::resource("/refresh")
                .wrap(gatekeeper.clone())
                .route(web::post().to(auth::refresh)),
        )
        .service(
            web::resource("/me")
                .wrap(gatekeeper)
                .route(web::get().to(auth::me)),
        )
        .default_service(web::to(not_found))
}

/// Malformed or non-JSON bodies answer with the error envelope
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "Rejected request body");
        ApiError::BadRequest("Invalid request data".to_string()).into()
    })
}

async fn not_found() -> Result<actix_web::HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}
