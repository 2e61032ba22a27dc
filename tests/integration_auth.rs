mod common;

use axum::http::StatusCode;
use common::{
    TEST_PASSWORD, body_json, create_test_user, generate_unique_email, json_request,
    setup_test_app, send, unique_id,
};
use rollcall::rollcall_auth::{UserRole, verify_token};
use serde_json::json;
use sqlx::PgPool;

fn register_body(id: &str, email: &str, role: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Grace Hopper",
        "email": email,
        "password": "secret123",
        "role": role,
        "roll_number": "42",
        "enrollment_number": "EN-2024-042"
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_student(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let id = unique_id("S");
    let email = generate_unique_email();

    let response = send(
        app,
        json_request("POST", "/api/auth/register", None, &register_body(&id, &email, "student")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User registered successfully!");

    let (roll, hash): (Option<String>, String) =
        sqlx::query_as("SELECT roll_number, password_hash FROM users WHERE id = $1")
            .bind(&id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(roll.as_deref(), Some("42"));
    assert_ne!(hash, "secret123");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_teacher_drops_student_numbers(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let id = unique_id("T");

    let response = send(
        app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            &register_body(&id, &generate_unique_email(), "teacher"),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let roll: Option<String> = sqlx::query_scalar("SELECT roll_number FROM users WHERE id = $1")
        .bind(&id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(roll, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_missing_field(pool: PgPool) {
    for field in ["id", "name", "email", "password", "role"] {
        let mut body = register_body(&unique_id("S"), &generate_unique_email(), "student");
        body.as_object_mut().unwrap().remove(field);

        let response = send(
            setup_test_app(pool.clone()),
            json_request("POST", "/api/auth/register", None, &body),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "missing {field}");
        let body = body_json(response).await;
        assert_eq!(body["error"], format!("{field} is required"));
    }

    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM users").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_same_email_twice(pool: PgPool) {
    let email = generate_unique_email();

    let first = send(
        setup_test_app(pool.clone()),
        json_request(
            "POST",
            "/api/auth/register",
            None,
            &register_body(&unique_id("S"), &email, "student"),
        ),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = send(
        setup_test_app(pool.clone()),
        json_request(
            "POST",
            "/api/auth/register",
            None,
            &register_body(&unique_id("S"), &email, "student"),
        ),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = body_json(second).await;
    assert_eq!(body["error"], "User with this ID or email already exists.");

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_id_or_email(pool: PgPool) {
    let existing = create_test_user(&pool, UserRole::Student).await;

    let same_id = send(
        setup_test_app(pool.clone()),
        json_request(
            "POST",
            "/api/auth/register",
            None,
            &register_body(&existing.id, &generate_unique_email(), "student"),
        ),
    )
    .await;
    assert_eq!(same_id.status(), StatusCode::CONFLICT);

    let same_email = send(
        setup_test_app(pool.clone()),
        json_request(
            "POST",
            "/api/auth/register",
            None,
            &register_body(&unique_id("S"), &existing.email.to_uppercase(), "student"),
        ),
    )
    .await;
    assert_eq!(same_email.status(), StatusCode::CONFLICT);
    let body = body_json(same_email).await;
    assert_eq!(body["error"], "User with this ID or email already exists.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_admin_is_forbidden(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let response = send(
        app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            &register_body(&unique_id("A"), &generate_unique_email(), "admin"),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let admins = common::count(&pool, "SELECT COUNT(*) FROM users WHERE role = 'admin'").await;
    assert_eq!(admins, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_unknown_role(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(
        app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            &register_body("X-1", &generate_unique_email(), "janitor"),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher).await;
    let app = setup_test_app(pool);

    let response = send(
        app,
        json_request(
            "POST",
            "/api/auth/teacher/login",
            None,
            &json!({ "email": teacher.email, "password": TEST_PASSWORD }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["id"], teacher.id);
    assert_eq!(body["user"]["role"], "teacher");
    assert_eq!(body["user"]["name"], teacher.name);

    let token = body["token"].as_str().unwrap();
    let claims = verify_token(token, &common::test_jwt_config()).unwrap();
    assert_eq!(claims.sub, teacher.id);
    assert_eq!(claims.role, UserRole::Teacher);
    assert_eq!(body["user"]["name"], claims.name);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_email_is_case_insensitive(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;

    let response = send(
        setup_test_app(pool),
        json_request(
            "POST",
            "/api/auth/student/login",
            None,
            &json!({ "email": student.email.to_uppercase(), "password": TEST_PASSWORD }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;

    let wrong_password = send(
        setup_test_app(pool.clone()),
        json_request(
            "POST",
            "/api/auth/student/login",
            None,
            &json!({ "email": student.email, "password": "wrongpass" }),
        ),
    )
    .await;
    let unknown_email = send(
        setup_test_app(pool),
        json_request(
            "POST",
            "/api/auth/student/login",
            None,
            &json!({ "email": "nobody@test.com", "password": "wrongpass" }),
        ),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(wrong_password).await, body_json(unknown_email).await);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_portal(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;

    let response = send(
        setup_test_app(pool),
        json_request(
            "POST",
            "/api/auth/teacher/login",
            None,
            &json!({ "email": student.email, "password": TEST_PASSWORD }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "Access denied. Please use the 'student' login portal."
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_login(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;

    let response = send(
        setup_test_app(pool),
        json_request(
            "POST",
            "/api/auth/admin/login",
            None,
            &json!({ "email": admin.email, "password": TEST_PASSWORD }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "admin");
}
