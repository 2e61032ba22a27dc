use axum::{Router, routing::post};

use super::controller::{admin_login, register_user, student_login, teacher_login};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/teacher/login", post(teacher_login))
        .route("/student/login", post(student_login))
        .route("/admin/login", post(admin_login))
}
