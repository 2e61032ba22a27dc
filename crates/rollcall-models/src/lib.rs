//! # Rollcall Models
//!
//! Database entities, request DTOs and response shapes for the Rollcall API.
//!
//! - [`users`]: user rows and the role enum
//! - [`auth`]: registration and login payloads
//! - [`lectures`]: lectures and the teacher-facing reports
//! - [`attendance`]: attendance rows and marking
//! - [`admin`]: dashboard and archive views

pub mod admin;
pub mod attendance;
pub mod auth;
pub mod lectures;
pub mod users;

pub use admin::{
    AttendanceOverview, CombinedAttendance, CombinedLectures, DashboardCounts, DashboardStats,
    LectureOverview, STATUS_ACTIVE, STATUS_ARCHIVED, SubjectAttendance, TopStudent, TrendPoint,
    merge_trends,
};
pub use attendance::{
    ATTENDANCE_PRESENT, Attendance, MarkAttendanceDto, MarkAttendanceResponse,
};
pub use auth::{Claims, LoginRequest, LoginResponse, LoginUser, MessageResponse, RegisterRequest};
pub use lectures::{
    CreateLectureDto, DEFAULTER_THRESHOLD_PERCENT, Defaulter, DefaulterCandidate, Lecture,
    LectureReportRow, LectureWithQr, LectureWithTeacher, LiveAttendee, attendance_url,
};
pub use users::{User, UserCredentials, UserRole, UserSummary};
