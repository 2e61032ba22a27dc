//! Attendance records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// The only status a self-marked attendance can have.
pub const ATTENDANCE_PRESENT: &str = "present";

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Attendance {
    pub id: i64,
    pub lecture_id: i64,
    pub student_id: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Body posted from the page a lecture's QR code links to.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceDto {
    pub lecture_id: i64,
    #[validate(length(min = 1, message = "studentId is required"))]
    pub student_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct MarkAttendanceResponse {
    pub message: String,
    pub id: i64,
}
