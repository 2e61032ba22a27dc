use axum::{Router, routing::get};

use super::controller::{health_check, service_info};
use crate::state::AppState;

/// Mounted at the root, outside `/api`.
pub fn init_root_router() -> Router<AppState> {
    Router::new().route("/", get(service_info))
}

/// Mounted under `/api`.
pub fn init_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
