use axum::{Json, extract::State};
use tracing::instrument;

use rollcall_core::AppError;
use rollcall_models::{
    AttendanceOverview, CombinedAttendance, CombinedLectures, DashboardStats, LectureOverview,
    MessageResponse, SubjectAttendance, TopStudent, TrendPoint, User,
};

use super::service::AdminService;
use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedPath;

/// Counts of users, lectures and attendance, live and archived
#[utoipa::path(
    get,
    path = "/api/admin/dashboard-stats",
    responses(
        (status = 200, description = "Dashboard counters", body = DashboardStats),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(AdminService::get_dashboard_stats(&state.db).await?))
}

/// All teachers and students
#[utoipa::path(
    get,
    path = "/api/admin/all-users",
    responses(
        (status = 200, description = "Non-admin users", body = Vec<User>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_all_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(AdminService::get_all_users(&state.db).await?))
}

/// Live lectures with teacher and head count
#[utoipa::path(
    get,
    path = "/api/admin/all-lectures",
    responses(
        (status = 200, description = "Active lectures", body = Vec<LectureOverview>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_all_lectures(
    State(state): State<AppState>,
) -> Result<Json<Vec<LectureOverview>>, AppError> {
    Ok(Json(AdminService::get_active_lectures(&state.db).await?))
}

/// Snapshots of deleted lectures
#[utoipa::path(
    get,
    path = "/api/admin/archived-lectures",
    responses(
        (status = 200, description = "Archived lectures", body = Vec<LectureOverview>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_archived_lectures(
    State(state): State<AppState>,
) -> Result<Json<Vec<LectureOverview>>, AppError> {
    Ok(Json(AdminService::get_archived_lectures(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/combined-lectures",
    responses(
        (status = 200, description = "Active, archived and both", body = CombinedLectures),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_combined_lectures(
    State(state): State<AppState>,
) -> Result<Json<CombinedLectures>, AppError> {
    Ok(Json(AdminService::get_combined_lectures(&state.db).await?))
}

/// Live attendance with student and lecture details
#[utoipa::path(
    get,
    path = "/api/admin/all-attendance",
    responses(
        (status = 200, description = "Active attendance", body = Vec<AttendanceOverview>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_all_attendance(
    State(state): State<AppState>,
) -> Result<Json<Vec<AttendanceOverview>>, AppError> {
    Ok(Json(AdminService::get_active_attendance(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/combined-attendance",
    responses(
        (status = 200, description = "Active, archived and both", body = CombinedAttendance),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_combined_attendance(
    State(state): State<AppState>,
) -> Result<Json<CombinedAttendance>, AppError> {
    Ok(Json(AdminService::get_combined_attendance(&state.db).await?))
}

/// Attendance per day over the last 30 days
#[utoipa::path(
    get,
    path = "/api/admin/attendance-trend",
    responses(
        (status = 200, description = "Daily counts, oldest first", body = Vec<TrendPoint>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_attendance_trend(
    State(state): State<AppState>,
) -> Result<Json<Vec<TrendPoint>>, AppError> {
    Ok(Json(AdminService::get_attendance_trend(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/top-students",
    responses(
        (status = 200, description = "Ten most present students", body = Vec<TopStudent>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_top_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<TopStudent>>, AppError> {
    Ok(Json(AdminService::get_top_students(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/attendance-by-subject",
    responses(
        (status = 200, description = "Lecture and attendance counts per subject", body = Vec<SubjectAttendance>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_attendance_by_subject(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubjectAttendance>>, AppError> {
    Ok(Json(AdminService::get_attendance_by_subject(&state.db).await?))
}

/// Delete a teacher or student and everything that depends on them
#[utoipa::path(
    delete,
    path = "/api/admin/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Cannot delete your own account", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin accounts cannot be deleted", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state, admin), fields(admin_id = %admin.user_id()))]
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedPath(user_id): ValidatedPath<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = AdminService::delete_user(&state.db, admin.user_id(), &user_id).await?;
    Ok(Json(MessageResponse::new(format!(
        "User \"{}\" deleted successfully",
        deleted.name
    ))))
}

/// Delete a lecture and its attendance, archiving both
#[utoipa::path(
    delete,
    path = "/api/admin/lectures/{lecture_id}",
    params(
        ("lecture_id" = i64, Path, description = "Lecture ID")
    ),
    responses(
        (status = 200, description = "Lecture deleted", body = MessageResponse),
        (status = 400, description = "Malformed lecture id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Lecture not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_lecture(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedPath(lecture_id): ValidatedPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let name = AdminService::delete_lecture(&state.db, lecture_id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Lecture \"{}\" deleted successfully and archived",
        name
    ))))
}
