use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use tf_core::domain::value_objects::AuthResponse;

/// Request body for POST /register
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Request body for POST /login
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token payload returned by register and login
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<AuthResponse> for TokenResponse {
    fn from(response: AuthResponse) -> Self {
        Self {
            token: response.token,
            user_id: response.user_id,
            email: response.email,
        }
    }
}

/// Response for POST /refresh
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RefreshResponse {
    pub token: String,
    pub user_id: Uuid,
}

/// Response for POST /logout
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Response for GET /me
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MeResponse {
    pub user_id: Uuid,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// First validation message of a rejected DTO, in field order of the struct
pub fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    ["email", "password"]
        .iter()
        .filter_map(|field| field_errors.get(field))
        .chain(field_errors.values())
        .flat_map(|errors| errors.iter())
        .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid request data".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_rejects_bad_email() {
        let request = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "secret123".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(first_validation_message(&errors), "Invalid email format");
    }

    #[test]
    fn test_register_request_rejects_short_password() {
        let request = RegisterRequest {
            email: "ada@example.com".to_string(),
            password: "12345".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            first_validation_message(&errors),
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn test_email_error_reported_before_password_error() {
        let request = RegisterRequest {
            email: "nope".to_string(),
            password: "1".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(first_validation_message(&errors), "Invalid email format");
    }

    #[test]
    fn test_token_response_omits_missing_email() {
        let response = TokenResponse {
            token: "t".to_string(),
            user_id: Uuid::nil(),
            email: None,
        };
        let body = serde_json::to_value(&response).unwrap();
        assert!(body.get("email").is_none());
    }
}
