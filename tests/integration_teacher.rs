mod common;

use axum::http::StatusCode;
use common::{
    FRONTEND_URL, body_json, create_test_attendance, create_test_lecture, create_test_user,
    create_test_user_with_roll, empty_request, json_request, send, setup_test_app,
};
use rollcall::rollcall_auth::UserRole;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_lecture(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher).await;
    let app = setup_test_app(pool.clone());

    let response = send(
        app,
        json_request(
            "POST",
            "/api/teacher/lectures",
            Some(&teacher.token()),
            &json!({
                "subject": "Operating Systems",
                "date": "2025-03-14",
                "time": "09:30",
                "teacher_id": teacher.id
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["id"].as_i64().unwrap();
    assert_eq!(body["name"], "Operating Systems - 2025-03-14");
    assert_eq!(body["date"], "2025-03-14");
    assert_eq!(body["teacher_id"], teacher.id);
    assert_eq!(
        body["qr_url"],
        format!("{}/attend?lectureId={}", FRONTEND_URL, id)
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_lecture_for_another_teacher_is_forbidden(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher).await;
    let other = create_test_user(&pool, UserRole::Teacher).await;

    let response = send(
        setup_test_app(pool.clone()),
        json_request(
            "POST",
            "/api/teacher/lectures",
            Some(&teacher.token()),
            &json!({
                "subject": "Networks",
                "date": "2025-03-14",
                "time": "11:00",
                "teacher_id": other.id
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM lectures").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_lecture_invalid_date(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher).await;

    let response = send(
        setup_test_app(pool),
        json_request(
            "POST",
            "/api/teacher/lectures",
            Some(&teacher.token()),
            &json!({
                "subject": "Networks",
                "date": "14/03/2025",
                "time": "11:00",
                "teacher_id": teacher.id
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_students_cannot_reach_teacher_routes(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;

    let response = send(
        setup_test_app(pool),
        empty_request(
            "GET",
            &format!("/api/teacher/lectures/{}", student.id),
            Some(&student.token()),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_teacher_lectures(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher).await;
    let other = create_test_user(&pool, UserRole::Teacher).await;
    create_test_lecture(&pool, &teacher.id, "Compilers").await;
    create_test_lecture(&pool, &teacher.id, "Databases").await;
    create_test_lecture(&pool, &other.id, "Graphics").await;

    let response = send(
        setup_test_app(pool.clone()),
        empty_request(
            "GET",
            &format!("/api/teacher/lectures/{}", teacher.id),
            Some(&teacher.token()),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let lectures = body.as_array().unwrap();
    assert_eq!(lectures.len(), 2);
    assert!(lectures.iter().all(|l| l["teacher_id"] == teacher.id.as_str()));
    assert!(lectures.iter().all(|l| l["qr_url"].is_string()));

    let forbidden = send(
        setup_test_app(pool),
        empty_request(
            "GET",
            &format!("/api/teacher/lectures/{}", other.id),
            Some(&teacher.token()),
        ),
    )
    .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_live_attendance(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher).await;
    let student = create_test_user_with_roll(&pool, UserRole::Student, Some("07")).await;
    let lecture_id = create_test_lecture(&pool, &teacher.id, "Compilers").await;
    create_test_attendance(&pool, lecture_id, &student.id).await;

    let response = send(
        setup_test_app(pool),
        empty_request(
            "GET",
            &format!("/api/teacher/lectures/{}/attendance", lecture_id),
            Some(&teacher.token()),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["student_name"], student.name);
    assert_eq!(body[0]["roll_number"], "07");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_live_attendance_unknown_lecture(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher).await;

    let response = send(
        setup_test_app(pool),
        empty_request(
            "GET",
            "/api/teacher/lectures/999999/attendance",
            Some(&teacher.token()),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_lecture_report_of_other_teacher_is_forbidden(pool: PgPool) {
    let owner = create_test_user(&pool, UserRole::Teacher).await;
    let intruder = create_test_user(&pool, UserRole::Teacher).await;
    let lecture_id = create_test_lecture(&pool, &owner.id, "Compilers").await;

    let response = send(
        setup_test_app(pool),
        empty_request(
            "GET",
            &format!("/api/teacher/lecture-report/{}", lecture_id),
            Some(&intruder.token()),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_lecture_report_orders_by_roll_number(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher).await;
    let late = create_test_user_with_roll(&pool, UserRole::Student, Some("20")).await;
    let early = create_test_user_with_roll(&pool, UserRole::Student, Some("03")).await;
    let unnumbered = create_test_user(&pool, UserRole::Student).await;
    let lecture_id = create_test_lecture(&pool, &teacher.id, "Compilers").await;
    create_test_attendance(&pool, lecture_id, &unnumbered.id).await;
    create_test_attendance(&pool, lecture_id, &late.id).await;
    create_test_attendance(&pool, lecture_id, &early.id).await;

    let admin = create_test_user(&pool, UserRole::Admin).await;
    let response = send(
        setup_test_app(pool),
        empty_request(
            "GET",
            &format!("/api/teacher/lecture-report/{}", lecture_id),
            Some(&admin.token()),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![early.id.as_str(), late.id.as_str(), unnumbered.id.as_str()]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_defaulters(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher).await;
    let regular = create_test_user(&pool, UserRole::Student).await;
    let truant = create_test_user(&pool, UserRole::Student).await;
    create_test_user(&pool, UserRole::Student).await;

    let mut lectures = Vec::new();
    for subject in ["A", "B", "C", "D"] {
        lectures.push(create_test_lecture(&pool, &teacher.id, subject).await);
    }
    for &lecture_id in &lectures {
        create_test_attendance(&pool, lecture_id, &regular.id).await;
    }
    for &lecture_id in &lectures[..2] {
        create_test_attendance(&pool, lecture_id, &truant.id).await;
    }

    let response = send(
        setup_test_app(pool),
        empty_request(
            "GET",
            &format!("/api/teacher/reports/defaulters/{}", teacher.id),
            Some(&teacher.token()),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let defaulters = body.as_array().unwrap();
    // students who never attended are not listed
    assert_eq!(defaulters.len(), 1);
    assert_eq!(defaulters[0]["id"], truant.id);
    assert_eq!(defaulters[0]["attended_count"], 2);
    assert_eq!(defaulters[0]["total_lectures"], 4);
    assert_eq!(defaulters[0]["percentage"], 50.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_defaulters_without_lectures(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher).await;

    let response = send(
        setup_test_app(pool),
        empty_request(
            "GET",
            &format!("/api/teacher/reports/defaulters/{}", teacher.id),
            Some(&teacher.token()),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_lecture_routes_reject_malformed_id(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher).await;

    for uri in [
        "/api/teacher/lecture-report/abc",
        "/api/teacher/lectures/abc/attendance",
    ] {
        let response = send(
            setup_test_app(pool.clone()),
            empty_request("GET", uri, Some(&teacher.token())),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(response).await["error"], "Invalid path parameter");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_lecture_owner_deleted_mid_request(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher).await;
    sqlx::query(
        "CREATE FUNCTION vanish_owner() RETURNS trigger LANGUAGE plpgsql AS $$ \
         BEGIN DELETE FROM users WHERE id = NEW.teacher_id; RETURN NEW; END $$",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER vanish_before_lecture BEFORE INSERT ON lectures \
         FOR EACH ROW EXECUTE FUNCTION vanish_owner()",
    )
    .execute(&pool)
    .await
    .unwrap();

    let response = send(
        setup_test_app(pool.clone()),
        json_request(
            "POST",
            "/api/teacher/lectures",
            Some(&teacher.token()),
            &json!({
                "subject": "Operating Systems",
                "date": "2025-03-14",
                "time": "09:30",
                "teacher_id": teacher.id
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Teacher not found");
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM lectures").await, 0);
}
