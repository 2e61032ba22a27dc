use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use rollcall_auth::{Claims, UserRole, encode_claims};
use rollcall_config::JwtConfig;
use rollcall_core::{AppError, DUMMY_PASSWORD_HASH, hash_password, verify_password};
use rollcall_models::{LoginRequest, LoginResponse, LoginUser, RegisterRequest, UserCredentials};

use crate::metrics::{
    track_jwt_issued, track_user_login_failure, track_user_login_success, track_user_registered,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials.";

pub struct AuthService;

impl AuthService {
    /// Creates a teacher or student account.
    ///
    /// Admin accounts can only be created with `rollcall-cli create-admin`.
    #[instrument(skip(db, dto), fields(user_id = %dto.id, role = %dto.role))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequest) -> Result<(), AppError> {
        if dto.role == UserRole::Admin {
            return Err(AppError::forbidden(
                "Admin accounts cannot be registered through the API.",
            ));
        }

        // Roll and enrollment numbers only mean something for students
        let (roll_number, enrollment_number) = match dto.role {
            UserRole::Student => (
                non_blank(dto.roll_number),
                non_blank(dto.enrollment_number),
            ),
            _ => (None, None),
        };

        let password_hash = hash_password(&dto.password)?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, roll_number, enrollment_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(dto.id.trim())
        .bind(dto.name.trim())
        .bind(dto.email.trim().to_lowercase())
        .bind(&password_hash)
        .bind(dto.role)
        .bind(roll_number)
        .bind(enrollment_number)
        .execute(db)
        .await;

        match result {
            Ok(_) => {
                track_user_registered(dto.role.as_str());
                tracing::info!("User registered");
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::conflict("User with this ID or email already exists."),
            ),
            Err(e) => Err(AppError::database(
                anyhow::Error::new(e).context("Failed to insert user"),
            )),
        }
    }

    /// Authenticates against one login portal.
    ///
    /// Unknown emails and wrong passwords fail identically. An account
    /// that exists under another role is pointed at its own portal.
    #[instrument(skip(db, dto, jwt_config), fields(expected_role = %expected_role))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        expected_role: UserRole,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let user = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, name, email, password_hash, role FROM users WHERE email = $1",
        )
        .bind(dto.email.trim().to_lowercase())
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by email")
        .map_err(AppError::database)?;

        let Some(user) = user else {
            // Same bcrypt cost as a wrong password.
            verify_password(&dto.password, DUMMY_PASSWORD_HASH);
            track_user_login_failure("unknown_email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if user.role != expected_role {
            track_user_login_failure("role_mismatch");
            return Err(AppError::forbidden(format!(
                "Access denied. Please use the '{}' login portal.",
                user.role
            )));
        }

        if !verify_password(&dto.password, &user.password_hash) {
            track_user_login_failure("invalid_password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let claims = Claims::issue(
            &user.id,
            user.role,
            &user.name,
            jwt_config.access_token_expiry,
        );
        let token = encode_claims(&claims, jwt_config)?;
        track_jwt_issued();
        track_user_login_success(user.role.as_str());

        Ok(LoginResponse {
            token,
            user: LoginUser::from(&claims),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  42 ".to_string())), Some("42".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}
