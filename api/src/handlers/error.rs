use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tf_core::errors::{AuthError, DomainError, TokenError};

use crate::dto::error::{ErrorResponse, ErrorResponseExt};

/// Error type returned by handlers, extractors and the auth middleware
///
/// Everything is rendered as `{"success": false, "error": ..., "code": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Token(#[from] TokenError),

    /// Request body failed DTO validation or could not be parsed
    #[error("{0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(error) => domain_error_status(error),
            ApiError::Token(error) => token_error_status(error),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Domain(error) => handle_domain_error(error),
            ApiError::Token(error) => handle_token_error(error),
            ApiError::BadRequest(message) => {
                ErrorResponse::for_status(message.clone(), StatusCode::BAD_REQUEST).to_response()
            }
            ApiError::NotFound => {
                ErrorResponse::for_status("Not found", StatusCode::NOT_FOUND).to_response()
            }
        }
    }
}

/// HTTP status for a gatekeeper failure
pub fn token_error_status(error: &TokenError) -> StatusCode {
    match error {
        TokenError::MissingCredential
        | TokenError::Revoked
        | TokenError::InvalidToken { .. }
        | TokenError::MalformedClaims { .. }
        | TokenError::Expired => StatusCode::UNAUTHORIZED,
        TokenError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        TokenError::SigningError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// HTTP status for a domain failure
pub fn domain_error_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Auth(AuthError::UserNotFound) | DomainError::NotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        DomainError::Auth(_) | DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Token(token_error) => token_error_status(token_error),
        DomainError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Convert a gatekeeper failure into the error envelope
///
/// Not logged here; the token services already reported the failure to
/// their observer. The client only ever sees the public message.
pub fn handle_token_error(error: &TokenError) -> HttpResponse {
    let status = token_error_status(error);
    ErrorResponse::for_status(error.public_message(), status).to_response()
}

/// Convert domain errors to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = domain_error_status(error);

    let message = match error {
        DomainError::Token(token_error) => return handle_token_error(token_error),
        DomainError::Auth(auth_error) => auth_error.to_string(),
        DomainError::Validation { message } => message.clone(),
        DomainError::NotFound { resource } => format!("{} not found", resource),
        DomainError::Store(store_error) => {
            tracing::error!(error = %store_error, "Store failure");
            "Service temporarily unavailable".to_string()
        }
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            tracing::error!(error = %error, "Internal failure");
            "Internal server error".to_string()
        }
    };

    ErrorResponse::for_status(message, status).to_response()
}
