use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    create_lecture, get_defaulters, get_lecture_report, get_live_attendance, get_teacher_lectures,
};
use crate::state::AppState;

pub fn init_teacher_router() -> Router<AppState> {
    Router::new()
        .route("/lectures", post(create_lecture))
        // `{id}` is a teacher id here and a lecture id below
        .route("/lectures/{id}", get(get_teacher_lectures))
        .route("/lectures/{id}/attendance", get(get_live_attendance))
        .route("/reports/defaulters/{teacher_id}", get(get_defaulters))
        .route("/lecture-report/{id}", get(get_lecture_report))
}
