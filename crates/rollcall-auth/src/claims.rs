//! JWT claim structure for access tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::role::UserRole;

/// JWT claims for access tokens.
///
/// Carries everything the auth gate needs, so protected routes never hit
/// the database to authenticate a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub role: UserRole,
    /// Display name
    pub name: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    /// Builds claims for `user_id` issued now and expiring `ttl_seconds` later.
    pub fn issue(user_id: &str, role: UserRole, name: &str, ttl_seconds: i64) -> Self {
        let now = Utc::now().timestamp();
        let exp = (now + ttl_seconds).max(0);

        Self {
            sub: user_id.to_string(),
            role,
            name: name.to_string(),
            exp: exp as usize,
            iat: now.max(0) as usize,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.sub
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
