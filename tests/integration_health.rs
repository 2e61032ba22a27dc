mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, empty_request, send, setup_test_app};
use rollcall::rollcall_auth::UserRole;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_service_info(pool: PgPool) {
    let response = send(setup_test_app(pool), empty_request("GET", "/", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "online");
    assert_eq!(body["service"], "Rollcall API");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_health_check_counts_users(pool: PgPool) {
    create_test_user(&pool, UserRole::Student).await;

    let response = send(setup_test_app(pool), empty_request("GET", "/api/health", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["users"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_health_check_with_closed_pool(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    pool.close().await;

    let response = send(app, empty_request("GET", "/api/health", None)).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["error"], "Database unavailable");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_route(pool: PgPool) {
    let response = send(setup_test_app(pool), empty_request("GET", "/api/nope", None)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Route not found");
}
