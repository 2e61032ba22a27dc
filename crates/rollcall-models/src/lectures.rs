//! Lecture domain models and DTOs.
//!
//! Lectures are owned by a teacher. Each one is reachable through a QR
//! link that students open to mark themselves present.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Share of lectures a student must attend to stay off the defaulter list.
pub const DEFAULTER_THRESHOLD_PERCENT: f64 = 75.0;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Lecture {
    pub id: i64,
    pub name: String,
    pub subject: String,
    #[schema(value_type = String, format = Date, example = "2025-03-14")]
    pub date: NaiveDate,
    #[schema(example = "09:30")]
    pub time: String,
    pub teacher_id: String,
    pub created_at: DateTime<Utc>,
}

/// Lecture together with the link encoded in its QR code.
#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct LectureWithQr {
    #[serde(flatten)]
    pub lecture: Lecture,
    pub qr_url: String,
}

impl LectureWithQr {
    pub fn new(lecture: Lecture, frontend_url: &str) -> Self {
        let qr_url = attendance_url(frontend_url, lecture.id);
        Self { lecture, qr_url }
    }
}

/// The page a student lands on after scanning a lecture's QR code.
pub fn attendance_url(frontend_url: &str, lecture_id: i64) -> String {
    format!(
        "{}/attend?lectureId={}",
        frontend_url.trim_end_matches('/'),
        lecture_id
    )
}

/// Lecture row joined with its teacher's name, as listed to students.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct LectureWithTeacher {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub lecture: Lecture,
    pub teacher_name: String,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateLectureDto {
    #[validate(length(min = 1, message = "subject is required"))]
    #[schema(example = "Operating Systems")]
    pub subject: String,
    #[schema(value_type = String, format = Date, example = "2025-03-14")]
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "time is required"))]
    #[schema(example = "09:30")]
    pub time: String,
    #[validate(length(min = 1, message = "teacher_id is required"))]
    pub teacher_id: String,
}

impl CreateLectureDto {
    /// Lectures are named after their subject and day.
    pub fn lecture_name(&self) -> String {
        format!("{} - {}", self.subject, self.date)
    }
}

/// A student that has marked attendance for a lecture, newest first.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct LiveAttendee {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub student_name: String,
    pub roll_number: Option<String>,
    pub enrollment_number: Option<String>,
}

/// One line of a lecture's attendance report.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct LectureReportRow {
    pub id: String,
    pub name: String,
    pub roll_number: Option<String>,
    pub enrollment_number: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// A student with at least one attendance in a teacher's lectures.
#[derive(FromRow, Debug, Clone)]
pub struct DefaulterCandidate {
    pub id: String,
    pub name: String,
    pub roll_number: Option<String>,
    pub enrollment_number: Option<String>,
    pub attended_count: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Defaulter {
    pub id: String,
    pub name: String,
    pub roll_number: Option<String>,
    pub enrollment_number: Option<String>,
    pub attended_count: i64,
    pub total_lectures: i64,
    pub percentage: f64,
}

impl DefaulterCandidate {
    /// Attendance as a percentage of `total_lectures`, or `None` when the
    /// teacher has no lectures at all.
    pub fn percentage(&self, total_lectures: i64) -> Option<f64> {
        (total_lectures > 0).then(|| self.attended_count as f64 / total_lectures as f64 * 100.0)
    }

    /// Returns the defaulter entry when attendance is below the threshold.
    pub fn into_defaulter(self, total_lectures: i64) -> Option<Defaulter> {
        let percentage = self.percentage(total_lectures)?;
        (percentage < DEFAULTER_THRESHOLD_PERCENT).then(|| Defaulter {
            id: self.id,
            name: self.name,
            roll_number: self.roll_number,
            enrollment_number: self.enrollment_number,
            attended_count: self.attended_count,
            total_lectures,
            percentage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(attended_count: i64) -> DefaulterCandidate {
        DefaulterCandidate {
            id: "S-1".to_string(),
            name: "Grace".to_string(),
            roll_number: Some("42".to_string()),
            enrollment_number: None,
            attended_count,
        }
    }

    #[test]
    fn test_half_attendance_is_a_defaulter() {
        let defaulter = candidate(2).into_defaulter(4).unwrap();
        assert_eq!(defaulter.percentage, 50.0);
        assert_eq!(defaulter.total_lectures, 4);
    }

    #[test]
    fn test_exact_threshold_is_not_a_defaulter() {
        assert!(candidate(3).into_defaulter(4).is_none());
        assert!(candidate(4).into_defaulter(4).is_none());
    }

    #[test]
    fn test_no_lectures_yields_nothing() {
        assert_eq!(candidate(0).percentage(0), None);
        assert!(candidate(0).into_defaulter(0).is_none());
    }

    #[test]
    fn test_lecture_name_combines_subject_and_date() {
        let dto = CreateLectureDto {
            subject: "Compilers".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            time: "09:30".to_string(),
            teacher_id: "T-1".to_string(),
        };
        assert_eq!(dto.lecture_name(), "Compilers - 2025-03-14");
    }

    #[test]
    fn test_attendance_url_trims_trailing_slash() {
        assert_eq!(
            attendance_url("https://app.example.edu/", 7),
            "https://app.example.edu/attend?lectureId=7"
        );
    }
}
