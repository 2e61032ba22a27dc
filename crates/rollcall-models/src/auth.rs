//! Authentication payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::UserRole;

pub use rollcall_auth::Claims;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "id is required"))]
    #[schema(example = "S-2024-042")]
    pub id: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    pub role: UserRole,
    pub roll_number: Option<String>,
    pub enrollment_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "password123")]
    pub password: String,
}

/// The identity embedded in the issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginUser {
    pub id: String,
    pub role: UserRole,
    pub name: String,
}

impl From<&Claims> for LoginUser {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.sub.clone(),
            role: claims.role,
            name: claims.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_register_request_validation() {
        let valid: RegisterRequest = serde_json::from_str(
            r#"{"id":"S-1","name":"Grace","email":"grace@example.edu","password":"pw","role":"student","roll_number":"42"}"#,
        )
        .unwrap();
        assert!(valid.validate().is_ok());
        assert_eq!(valid.enrollment_number, None);

        let blank_name = RegisterRequest {
            name: String::new(),
            ..valid.clone()
        };
        assert!(blank_name.validate().is_err());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_register_request_requires_role() {
        let result = serde_json::from_str::<RegisterRequest>(
            r#"{"id":"S-1","name":"Grace","email":"grace@example.edu","password":"pw"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_login_user_mirrors_token_claims() {
        let claims = Claims::issue("T-7", UserRole::Teacher, "Ada Lovelace", 60);
        let user = LoginUser::from(&claims);
        assert_eq!(user.id, "T-7");
        assert_eq!(user.role, UserRole::Teacher);
        assert_eq!(user.name, "Ada Lovelace");
    }

    #[test]
    fn test_login_request_rejects_blank_fields() {
        let request = LoginRequest {
            email: String::new(),
            password: "pw".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
