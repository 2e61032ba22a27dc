//! User data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

pub use rollcall_auth::UserRole;

/// A user as exposed by the API. The password hash never leaves the
/// service layer.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub roll_number: Option<String>,
    pub enrollment_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row used by the login flow only.
#[derive(FromRow, Debug, Clone)]
pub struct UserCredentials {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Minimal projection used by the delete workflow.
#[derive(FromRow, Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub role: UserRole,
}
