#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use rollcall::rollcall_auth::{UserRole, create_access_token};
use rollcall::config::{CorsConfig, JwtConfig, ServerConfig};
use rollcall::rollcall_core::hash_password;
use rollcall::router::init_router;
use rollcall::state::AppState;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "testpass123";
pub const FRONTEND_URL: &str = "http://localhost:5173";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        access_token_expiry: 3_600,
    }
}

pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        server_config: ServerConfig::from_lookup(|_| None),
        cors_config: CorsConfig::from_lookup(|_| None),
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    init_router(test_state(pool))
}

pub struct TestUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

impl TestUser {
    pub fn token(&self) -> String {
        create_access_token(&self.id, self.role, &self.name, &test_jwt_config()).unwrap()
    }
}

pub fn unique_id(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub async fn create_test_user(pool: &PgPool, role: UserRole) -> TestUser {
    create_test_user_with_roll(pool, role, None).await
}

pub async fn create_test_user_with_roll(
    pool: &PgPool,
    role: UserRole,
    roll_number: Option<&str>,
) -> TestUser {
    let id = unique_id(match role {
        UserRole::Admin => "A",
        UserRole::Teacher => "T",
        UserRole::Student => "S",
    });
    let name = format!("Test {}", id);
    let email = generate_unique_email();
    let hashed = hash_password(TEST_PASSWORD).unwrap();

    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, role, roll_number)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(&id)
    .bind(&name)
    .bind(&email)
    .bind(&hashed)
    .bind(role)
    .bind(roll_number)
    .execute(pool)
    .await
    .unwrap();

    TestUser {
        id,
        name,
        email,
        password: TEST_PASSWORD.to_string(),
        role,
    }
}

pub async fn create_test_lecture(pool: &PgPool, teacher_id: &str, subject: &str) -> i64 {
    let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    sqlx::query_scalar(
        r#"
        INSERT INTO lectures (name, subject, date, time, teacher_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(format!("{} - {}", subject, date))
    .bind(subject)
    .bind(date)
    .bind("09:30")
    .bind(teacher_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_attendance(pool: &PgPool, lecture_id: i64, student_id: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO attendance (lecture_id, student_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(lecture_id)
    .bind(student_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count(pool: &PgPool, sql: &str) -> i64 {
    sqlx::query_scalar(sql).fetch_one(pool).await.unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
