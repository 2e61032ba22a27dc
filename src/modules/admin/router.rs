use axum::{
    Router,
    routing::{delete, get},
};

use super::controller::{
    delete_lecture, delete_user, get_all_attendance, get_all_lectures, get_all_users,
    get_archived_lectures, get_attendance_by_subject, get_attendance_trend,
    get_combined_attendance, get_combined_lectures, get_dashboard_stats, get_top_students,
};
use crate::state::AppState;

pub fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard-stats", get(get_dashboard_stats))
        .route("/all-users", get(get_all_users))
        .route("/all-lectures", get(get_all_lectures))
        .route("/archived-lectures", get(get_archived_lectures))
        .route("/combined-lectures", get(get_combined_lectures))
        .route("/all-attendance", get(get_all_attendance))
        .route("/combined-attendance", get(get_combined_attendance))
        .route("/attendance-trend", get(get_attendance_trend))
        .route("/top-students", get(get_top_students))
        .route("/attendance-by-subject", get(get_attendance_by_subject))
        .route("/users/{user_id}", delete(delete_user))
        .route("/lectures/{lecture_id}", delete(delete_lecture))
}
