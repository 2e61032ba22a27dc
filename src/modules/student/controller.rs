use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use rollcall_core::AppError;
use rollcall_models::{Attendance, LectureWithTeacher, MarkAttendanceDto, MarkAttendanceResponse};

use super::service::StudentService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::ensure_self_or_admin;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

/// Mark the caller present for a lecture
#[utoipa::path(
    post,
    path = "/api/student/mark-attendance",
    request_body = MarkAttendanceDto,
    responses(
        (status = 201, description = "Attendance marked", body = MarkAttendanceResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Marking for another student", body = ErrorResponse),
        (status = 404, description = "Lecture or student not found", body = ErrorResponse),
        (status = 409, description = "Attendance already marked", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Student"
)]
#[instrument(skip(state, auth_user))]
pub async fn mark_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<MarkAttendanceDto>,
) -> Result<(StatusCode, Json<MarkAttendanceResponse>), AppError> {
    ensure_self_or_admin(&auth_user, &dto.student_id)?;

    let id = StudentService::mark_attendance(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(MarkAttendanceResponse {
            message: "Attendance marked successfully!".to_string(),
            id,
        }),
    ))
}

/// All lectures with their teacher, newest first
#[utoipa::path(
    get,
    path = "/api/student/lectures",
    responses(
        (status = 200, description = "Lectures", body = Vec<LectureWithTeacher>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Student"
)]
#[instrument(skip(state))]
pub async fn get_lectures(
    State(state): State<AppState>,
) -> Result<Json<Vec<LectureWithTeacher>>, AppError> {
    let lectures = StudentService::get_lectures(&state.db).await?;
    Ok(Json(lectures))
}

/// A student's attendance history, newest first
#[utoipa::path(
    get,
    path = "/api/student/attendance/{student_id}",
    params(
        ("student_id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Attendance records", body = Vec<Attendance>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Another student's history", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Student"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_attendance_history(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(student_id): ValidatedPath<String>,
) -> Result<Json<Vec<Attendance>>, AppError> {
    ensure_self_or_admin(&auth_user, &student_id)?;

    let records = StudentService::get_attendance_history(&state.db, &student_id).await?;
    Ok(Json(records))
}
