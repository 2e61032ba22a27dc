use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use rollcall_auth::{Claims, UserRole};
use rollcall_models::{
    Attendance, AttendanceOverview, CombinedAttendance, CombinedLectures, CreateLectureDto,
    DashboardStats, Defaulter, Lecture, LectureOverview, LectureReportRow, LectureWithQr,
    LectureWithTeacher, LiveAttendee, LoginRequest, LoginResponse, LoginUser,
    MarkAttendanceDto, MarkAttendanceResponse, MessageResponse, RegisterRequest,
    SubjectAttendance, TopStudent, TrendPoint, User,
};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::health::controller::{HealthResponse, ServiceInfo};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::service_info,
        crate::modules::health::controller::health_check,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::teacher_login,
        crate::modules::auth::controller::student_login,
        crate::modules::auth::controller::admin_login,
        crate::modules::teacher::controller::create_lecture,
        crate::modules::teacher::controller::get_teacher_lectures,
        crate::modules::teacher::controller::get_defaulters,
        crate::modules::teacher::controller::get_live_attendance,
        crate::modules::teacher::controller::get_lecture_report,
        crate::modules::student::controller::mark_attendance,
        crate::modules::student::controller::get_lectures,
        crate::modules::student::controller::get_attendance_history,
        crate::modules::admin::controller::get_dashboard_stats,
        crate::modules::admin::controller::get_all_users,
        crate::modules::admin::controller::get_all_lectures,
        crate::modules::admin::controller::get_archived_lectures,
        crate::modules::admin::controller::get_combined_lectures,
        crate::modules::admin::controller::get_all_attendance,
        crate::modules::admin::controller::get_combined_attendance,
        crate::modules::admin::controller::get_attendance_trend,
        crate::modules::admin::controller::get_top_students,
        crate::modules::admin::controller::get_attendance_by_subject,
        crate::modules::admin::controller::delete_user,
        crate::modules::admin::controller::delete_lecture,
    ),
    components(
        schemas(
            User,
            UserRole,
            Claims,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            LoginUser,
            MessageResponse,
            ErrorResponse,
            Lecture,
            LectureWithQr,
            LectureWithTeacher,
            CreateLectureDto,
            LiveAttendee,
            LectureReportRow,
            Defaulter,
            Attendance,
            MarkAttendanceDto,
            MarkAttendanceResponse,
            DashboardStats,
            LectureOverview,
            CombinedLectures,
            AttendanceOverview,
            CombinedAttendance,
            TrendPoint,
            TopStudent,
            SubjectAttendance,
            ServiceInfo,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and database health"),
        (name = "Authentication", description = "Registration and role-scoped login"),
        (name = "Teacher", description = "Lectures, live attendance and reports"),
        (name = "Student", description = "Attendance marking and history"),
        (name = "Admin", description = "Dashboard, archives and deletions")
    ),
    info(
        title = "Rollcall API",
        version = "0.1.0",
        description = "Classroom attendance tracking: QR-linked lectures, self-marked attendance and archived admin reporting.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
