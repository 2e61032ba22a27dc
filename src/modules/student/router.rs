use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{get_attendance_history, get_lectures, mark_attendance};
use crate::state::AppState;

pub fn init_student_router() -> Router<AppState> {
    Router::new()
        .route("/mark-attendance", post(mark_attendance))
        .route("/lectures", get(get_lectures))
        .route("/attendance/{student_id}", get(get_attendance_history))
}
