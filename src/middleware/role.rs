//! Role-based authorization middleware for Axum
//!
//! Three ways to gate access:
//! 1. Layer-based middleware (`require_admin`, `require_teacher`,
//!    `require_student`) applied to a whole route group
//! 2. The `RequireAdmin` extractor for single handlers
//! 3. Helper functions for checks inside handler logic

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};

use rollcall_auth::UserRole;
use rollcall_core::AppError;

use crate::metrics::track_authorization_check;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];
const TEACHER_OR_ADMIN: &[UserRole] = &[UserRole::Teacher, UserRole::Admin];
const STUDENT_OR_ADMIN: &[UserRole] = &[UserRole::Student, UserRole::Admin];

/// Middleware function that checks if the authenticated user has one of the required roles.
///
/// Unauthenticated requests are rejected with 401 and wrong roles with 403,
/// before the handler runs.
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// let protected_routes = Router::new()
///     .route("/admin-only", get(admin_handler))
///     .layer(middleware::from_fn_with_state(
///         state.clone(),
///         |state, req, next| require_roles(state, req, next, &[UserRole::Admin])
///     ));
/// ```
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &[UserRole],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    check_any_role(&auth_user, allowed_roles)?;

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Gate for `/api/admin`.
///
/// ```rust,ignore
/// let admin_routes = init_admin_router()
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, ADMIN_ONLY).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Gate for `/api/teacher` (Teacher and Admin allowed)
pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, TEACHER_OR_ADMIN).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Gate for `/api/student` (Student and Admin allowed)
pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, STUDENT_OR_ADMIN).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Extractor for admin-only handlers. Yields the admin's identity.
///
/// ```rust,ignore
/// pub async fn delete_user(
///     RequireAdmin(admin): RequireAdmin,
///     Path(user_id): Path<String>,
/// ) -> Result<Json<MessageResponse>, AppError> {
///     // Only admins get here
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        check_role(&auth_user, UserRole::Admin)?;
        Ok(RequireAdmin(auth_user))
    }
}

/// Fails with 403 unless the caller has exactly `required_role`.
pub fn check_role(auth_user: &AuthUser, required_role: UserRole) -> Result<(), AppError> {
    check_any_role(auth_user, &[required_role])
}

/// Fails with 403 unless the caller has one of `allowed_roles`.
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    let user_role = auth_user.role();
    let allowed = allowed_roles.contains(&user_role);
    track_authorization_check(allowed, user_role.as_str());

    if !allowed {
        let required = allowed_roles
            .iter()
            .map(UserRole::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(AppError::forbidden(format!(
            "Access denied. Required role: {}, but user has role: {}",
            required, user_role
        )));
    }

    Ok(())
}

/// Teachers and students may only act on their own id. Admins may act on any.
pub fn ensure_self_or_admin(auth_user: &AuthUser, owner_id: &str) -> Result<(), AppError> {
    if auth_user.is_admin() || auth_user.user_id() == owner_id {
        return Ok(());
    }

    Err(AppError::forbidden(
        "Access denied. You can only access your own records.",
    ))
}
