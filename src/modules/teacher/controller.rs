use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use rollcall_core::AppError;
use rollcall_models::{CreateLectureDto, Defaulter, LectureReportRow, LectureWithQr, LiveAttendee};

use super::service::TeacherService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::ensure_self_or_admin;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

/// Create a lecture and get its QR link
#[utoipa::path(
    post,
    path = "/api/teacher/lectures",
    request_body = CreateLectureDto,
    responses(
        (status = 201, description = "Lecture created", body = LectureWithQr),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the caller's own teacher id", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teacher"
)]
#[instrument(skip(state, auth_user), fields(caller = %auth_user.user_id()))]
pub async fn create_lecture(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateLectureDto>,
) -> Result<(StatusCode, Json<LectureWithQr>), AppError> {
    ensure_self_or_admin(&auth_user, &dto.teacher_id)?;

    let lecture =
        TeacherService::create_lecture(&state.db, dto, &state.server_config.frontend_url).await?;
    Ok((StatusCode::CREATED, Json(lecture)))
}

/// List a teacher's lectures, newest first
#[utoipa::path(
    get,
    path = "/api/teacher/lectures/{id}",
    params(
        ("id" = String, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Lectures with QR links", body = Vec<LectureWithQr>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the caller's own teacher id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teacher"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_teacher_lectures(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(teacher_id): ValidatedPath<String>,
) -> Result<Json<Vec<LectureWithQr>>, AppError> {
    ensure_self_or_admin(&auth_user, &teacher_id)?;

    let lectures = TeacherService::get_teacher_lectures(
        &state.db,
        &teacher_id,
        &state.server_config.frontend_url,
    )
    .await?;
    Ok(Json(lectures))
}

/// Students below 75% attendance across a teacher's lectures
#[utoipa::path(
    get,
    path = "/api/teacher/reports/defaulters/{teacher_id}",
    params(
        ("teacher_id" = String, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Defaulter list", body = Vec<Defaulter>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the caller's own teacher id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teacher"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_defaulters(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(teacher_id): ValidatedPath<String>,
) -> Result<Json<Vec<Defaulter>>, AppError> {
    ensure_self_or_admin(&auth_user, &teacher_id)?;

    let defaulters = TeacherService::get_defaulters(&state.db, &teacher_id).await?;
    Ok(Json(defaulters))
}

/// Live attendance for a lecture, in check-in order
#[utoipa::path(
    get,
    path = "/api/teacher/lectures/{id}/attendance",
    params(
        ("id" = i64, Path, description = "Lecture ID")
    ),
    responses(
        (status = 200, description = "Attendees so far", body = Vec<LiveAttendee>),
        (status = 400, description = "Malformed lecture id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Lecture belongs to another teacher", body = ErrorResponse),
        (status = 404, description = "Lecture not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teacher"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_live_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(lecture_id): ValidatedPath<i64>,
) -> Result<Json<Vec<LiveAttendee>>, AppError> {
    let lecture = TeacherService::get_lecture(&state.db, lecture_id).await?;
    ensure_self_or_admin(&auth_user, &lecture.teacher_id)?;

    let attendees = TeacherService::get_live_attendance(&state.db, lecture_id).await?;
    Ok(Json(attendees))
}

/// Day-wise report of present students, by roll number
#[utoipa::path(
    get,
    path = "/api/teacher/lecture-report/{id}",
    params(
        ("id" = i64, Path, description = "Lecture ID")
    ),
    responses(
        (status = 200, description = "Present students", body = Vec<LectureReportRow>),
        (status = 400, description = "Malformed lecture id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Lecture belongs to another teacher", body = ErrorResponse),
        (status = 404, description = "Lecture not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teacher"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_lecture_report(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(lecture_id): ValidatedPath<i64>,
) -> Result<Json<Vec<LectureReportRow>>, AppError> {
    let lecture = TeacherService::get_lecture(&state.db, lecture_id).await?;
    ensure_self_or_admin(&auth_user, &lecture.teacher_id)?;

    let report = TeacherService::get_lecture_report(&state.db, lecture_id).await?;
    Ok(Json(report))
}
