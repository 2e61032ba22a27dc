//! Read models for the admin console.
//!
//! Active and archived records are reported side by side. Rows from both
//! sources share one shape; `status` tells them apart.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_ARCHIVED: &str = "archived";

/// Raw counts, one query.
#[derive(FromRow, Debug, Clone, Copy, Default)]
pub struct DashboardCounts {
    pub total_teachers: i64,
    pub total_students: i64,
    pub active_lectures: i64,
    pub archived_lectures: i64,
    pub active_attendance: i64,
    pub archived_attendance: i64,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub struct DashboardStats {
    pub total_teachers: i64,
    pub total_students: i64,
    pub active_lectures: i64,
    pub archived_lectures: i64,
    pub total_lectures: i64,
    pub active_attendance: i64,
    pub archived_attendance: i64,
    pub total_attendance_records: i64,
}

impl From<DashboardCounts> for DashboardStats {
    fn from(c: DashboardCounts) -> Self {
        Self {
            total_teachers: c.total_teachers,
            total_students: c.total_students,
            active_lectures: c.active_lectures,
            archived_lectures: c.archived_lectures,
            total_lectures: c.active_lectures + c.archived_lectures,
            active_attendance: c.active_attendance,
            archived_attendance: c.archived_attendance,
            total_attendance_records: c.active_attendance + c.archived_attendance,
        }
    }
}

/// A lecture, live or archived, with its teacher and head count.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct LectureOverview {
    pub id: i64,
    /// Set for archived rows only.
    pub original_lecture_id: Option<i64>,
    pub name: String,
    pub subject: String,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub time: String,
    pub teacher_id: String,
    pub teacher_name: Option<String>,
    pub teacher_email: Option<String>,
    pub attendance_count: i64,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
    pub status: String,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct CombinedLectures {
    pub active: Vec<LectureOverview>,
    pub archived: Vec<LectureOverview>,
    pub all: Vec<LectureOverview>,
}

impl CombinedLectures {
    pub fn new(active: Vec<LectureOverview>, archived: Vec<LectureOverview>) -> Self {
        let mut all: Vec<_> = active.iter().chain(archived.iter()).cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self {
            active,
            archived,
            all,
        }
    }
}

/// An attendance record, live or archived, with student and lecture details.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct AttendanceOverview {
    pub id: i64,
    /// Set for archived rows only.
    pub original_attendance_id: Option<i64>,
    pub lecture_id: i64,
    pub student_id: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub student_name: Option<String>,
    pub roll_number: Option<String>,
    pub enrollment_number: Option<String>,
    pub lecture_name: Option<String>,
    pub subject: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub lecture_date: Option<NaiveDate>,
    pub archived_at: Option<DateTime<Utc>>,
    pub record_status: String,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct CombinedAttendance {
    pub active: Vec<AttendanceOverview>,
    pub archived: Vec<AttendanceOverview>,
    pub all: Vec<AttendanceOverview>,
}

impl CombinedAttendance {
    pub fn new(active: Vec<AttendanceOverview>, archived: Vec<AttendanceOverview>) -> Self {
        let mut all: Vec<_> = active.iter().chain(archived.iter()).cloned().collect();
        all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self {
            active,
            archived,
            all,
        }
    }
}

/// Attendance marked on one calendar day.
#[derive(Serialize, FromRow, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub struct TrendPoint {
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub count: i64,
}

/// Sums per-day counts from several sources into one ascending series.
pub fn merge_trends(sources: impl IntoIterator<Item = Vec<TrendPoint>>) -> Vec<TrendPoint> {
    let mut by_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for point in sources.into_iter().flatten() {
        *by_day.entry(point.date).or_default() += point.count;
    }
    by_day
        .into_iter()
        .map(|(date, count)| TrendPoint { date, count })
        .collect()
}

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct TopStudent {
    pub id: String,
    pub name: String,
    pub roll_number: Option<String>,
    pub enrollment_number: Option<String>,
    pub attendance_count: i64,
}

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct SubjectAttendance {
    pub subject: String,
    pub lecture_count: i64,
    pub attendance_count: i64,
}
