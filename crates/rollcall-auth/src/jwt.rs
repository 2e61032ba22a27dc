//! JWT (JSON Web Token) utilities for authentication.
//!
//! Access tokens are HS256-signed and embed the user id, role and display
//! name together with an absolute expiry. The signing secret comes from
//! [`JwtConfig`]; without one no token is ever issued and every token is
//! rejected.
//!
//! # Example
//!
//! ```ignore
//! use rollcall_auth::{UserRole, create_access_token, verify_token};
//!
//! let token = create_access_token("S-042", UserRole::Student, "Grace Hopper", &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use rollcall_config::JwtConfig;
use rollcall_core::AppError;

use crate::claims::Claims;
use crate::role::UserRole;

/// Creates an access token for a user that just authenticated.
///
/// The token expires `jwt_config.access_token_expiry` seconds from now.
///
/// # Errors
///
/// Returns an internal error if the signing secret is not configured or
/// encoding fails.
pub fn create_access_token(
    user_id: &str,
    role: UserRole,
    name: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let claims = Claims::issue(user_id, role, name, jwt_config.access_token_expiry);
    encode_claims(&claims, jwt_config)
}

/// Signs an already-built set of claims.
pub fn encode_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    if !jwt_config.has_secret() {
        return Err(AppError::internal_error(
            "JWT signing secret is not configured",
        ));
    }

    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error if:
/// - The token is malformed
/// - The token signature is invalid
/// - The token has expired
/// - No signing secret is configured
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    if !jwt_config.has_secret() {
        return Err(AppError::unauthorized("Invalid or expired token"));
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNAUTHORIZED: u16 = 401;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 86_400,
        }
    }

    #[test]
    fn test_round_trip_preserves_claims() {
        let config = get_test_jwt_config();

        let token = create_access_token("T-100", UserRole::Teacher, "Ada Lovelace", &config)
            .unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, "T-100");
        assert_eq!(claims.role, UserRole::Teacher);
        assert_eq!(claims.name, "Ada Lovelace");
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn test_encode_claims_round_trip() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "S-042".to_string(),
            role: UserRole::Student,
            name: "Grace Hopper".to_string(),
            exp: now + 600,
            iat: now,
        };

        let token = encode_claims(&claims, &config).unwrap();
        assert_eq!(verify_token(&token, &config).unwrap(), claims);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = JwtConfig {
            access_token_expiry: -3_600,
            ..get_test_jwt_config()
        };

        let token = create_access_token("S-042", UserRole::Student, "Grace", &config).unwrap();
        let err = verify_token(&token, &config).unwrap_err();

        assert_eq!(err.status.as_u16(), UNAUTHORIZED);
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let config = get_test_jwt_config();
        assert!(verify_token("invalid-token", &config).is_err());
        assert!(verify_token("", &config).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let config = get_test_jwt_config();
        let token = create_access_token("A-1", UserRole::Admin, "Root", &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            ..get_test_jwt_config()
        };

        assert!(verify_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_missing_secret_refuses_to_issue_and_verify() {
        let config = get_test_jwt_config();
        let token = create_access_token("A-1", UserRole::Admin, "Root", &config).unwrap();

        let no_secret = JwtConfig {
            secret: String::new(),
            ..get_test_jwt_config()
        };

        let issue_err =
            create_access_token("A-1", UserRole::Admin, "Root", &no_secret).unwrap_err();
        assert!(issue_err.status.is_server_error());

        let verify_err = verify_token(&token, &no_secret).unwrap_err();
        assert_eq!(verify_err.status.as_u16(), UNAUTHORIZED);
    }
}
