//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::User;

/// Authentication response containing the issued token and principal metadata
///
/// Returned by register, login and refresh. Refresh carries no email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// Signed JWT for the `Authorization: Bearer` header
    pub token: String,

    /// Principal ID embedded as the token subject
    pub user_id: Uuid,

    /// Login email, present for register and login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl AuthResponse {
    /// Creates a new authentication response
    ///
    /// # Arguments
    ///
    /// * `token` - Signed JWT
    /// * `user_id` - Principal the token was issued for
    /// * `email` - Login email if known
    pub fn new(token: String, user_id: Uuid, email: Option<String>) -> Self {
        Self {
            token,
            user_id,
            email,
        }
    }

    /// Creates an authentication response for a stored user
    pub fn for_user(token: String, user: &User) -> Self {
        Self::new(token, user.id, Some(user.email.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_response_omits_email() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(AuthResponse::new("t".into(), id, None)).unwrap();

        assert_eq!(json, serde_json::json!({"token": "t", "user_id": id.to_string()}));
    }
}
