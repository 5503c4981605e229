//! End-to-end API tests over the full router with an in-memory database.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use lms::auth::Claims;
use lms::config::AppConfig;
use lms::models::user::{ROLE_STUDENT, ROLE_SYSTEM_ADMIN};
use lms::server::{AppState, create_app};

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::setup_test_db;

const TEST_SECRET: &str = "integration-test-secret-0123456789";

async fn setup_app() -> Result<Router> {
    let db = setup_test_db().await?;
    let config = AppConfig {
        profile: "test".to_string(),
        jwt_secret: Some(TEST_SECRET.to_string()),
        ..Default::default()
    };
    Ok(create_app(AppState {
        config: Arc::new(config),
        db,
    }))
}

fn token(org: Option<Uuid>, role: &str) -> String {
    let claims = Claims {
        sub: Uuid::new_v4(),
        org,
        role: role.to_string(),
        exp: Utc::now().timestamp() + 3600,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn root_is_public() -> Result<()> {
    let app = setup_app().await?;
    let response = app.oneshot(request("GET", "/", None, None)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn api_requires_authentication() -> Result<()> {
    let app = setup_app().await?;
    let response = app
        .oneshot(request("GET", "/api/v1/courses", None, None))
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json_body(response).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn organization_management_is_admin_only() -> Result<()> {
    let app = setup_app().await?;
    let student = token(Some(Uuid::new_v4()), ROLE_STUDENT);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/organizations",
            Some(&student),
            Some(json!({ "name": "Rogue Org" })),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin = token(None, ROLE_SYSTEM_ADMIN);
    let response = app
        .oneshot(request(
            "POST",
            "/api/v1/organizations",
            Some(&admin),
            Some(json!({ "name": "Real Org" })),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn course_crud_round_trip() -> Result<()> {
    let app = setup_app().await?;
    let member = token(Some(Uuid::new_v4()), ROLE_STUDENT);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/courses",
            Some(&member),
            Some(json!({ "title": "Intro to Databases" })),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/v1/courses/{id}"),
            Some(&member),
            Some(json!({ "description": "Relational fundamentals" })),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["title"], "Intro to Databases");
    assert_eq!(updated["description"], "Relational fundamentals");

    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/v1/courses/{id}"),
            Some(&member),
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/v1/courses/{id}"),
            Some(&member),
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(request(
            "POST",
            &format!("/api/v1/courses/{id}/restore"),
            Some(&member),
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn courses_are_invisible_across_tenants() -> Result<()> {
    let app = setup_app().await?;
    let member_a = token(Some(Uuid::new_v4()), ROLE_STUDENT);
    let member_b = token(Some(Uuid::new_v4()), ROLE_STUDENT);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/courses",
            Some(&member_a),
            Some(json!({ "title": "Private course" })),
        ))
        .await?;
    let created = json_body(response).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/v1/courses/{id}"),
            Some(&member_b),
            None,
        ))
        .await?;
    // NotFound, not Forbidden: existence must not leak across tenants.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn duplicate_enrollment_returns_conflict() -> Result<()> {
    let app = setup_app().await?;
    let member = token(Some(Uuid::new_v4()), ROLE_STUDENT);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/courses",
            Some(&member),
            Some(json!({ "title": "Course" })),
        ))
        .await?;
    let created = json_body(response).await;
    let course_id = created["id"].as_str().unwrap().to_string();

    let enroll_body = json!({ "course_id": course_id });
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/enrollments",
            Some(&member),
            Some(enroll_body.clone()),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(request(
            "POST",
            "/api/v1/enrollments",
            Some(&member),
            Some(enroll_body),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = json_body(response).await;
    assert_eq!(body["code"], "CONFLICT");
    Ok(())
}

#[tokio::test]
async fn quiz_submission_scores_and_records_completion() -> Result<()> {
    let app = setup_app().await?;
    let member = token(Some(Uuid::new_v4()), ROLE_STUDENT);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/courses",
            Some(&member),
            Some(json!({ "title": "Quiz course" })),
        ))
        .await?;
    let course_id = json_body(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/v1/courses/{course_id}/lessons"),
            Some(&member),
            Some(json!({ "title": "Quiz lesson", "sort_order": 0 })),
        ))
        .await?;
    let lesson_id = json_body(response).await["id"].as_str().unwrap().to_string();

    let q1 = Uuid::new_v4();
    let q2 = Uuid::new_v4();
    let opt_a = Uuid::new_v4();
    let opt_b = Uuid::new_v4();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/v1/lessons/{lesson_id}/items"),
            Some(&member),
            Some(json!({
                "title": "Final quiz",
                "item_type": "question",
                "sort_order": 0,
                "content": {
                    "questions": [
                        { "id": q1, "correct_option_id": opt_a },
                        { "id": q2, "correct_option_id": opt_b }
                    ]
                }
            })),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let item_id = json_body(response).await["id"].as_str().unwrap().to_string();

    // Answer only q1, correctly: 1 of 2 = 50%.
    let response = app
        .oneshot(request(
            "POST",
            &format!("/api/v1/lesson-items/{item_id}/quiz"),
            Some(&member),
            Some(json!({
                "answers": [
                    { "question_id": q1, "selected_option_id": opt_a }
                ]
            })),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let evaluation = json_body(response).await;
    assert_eq!(evaluation["percentage"], 50);
    assert_eq!(evaluation["correct_count"], 1);
    assert_eq!(evaluation["total_count"], 2);
    Ok(())
}

#[tokio::test]
async fn question_item_without_content_is_rejected() -> Result<()> {
    let app = setup_app().await?;
    let member = token(Some(Uuid::new_v4()), ROLE_STUDENT);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/courses",
            Some(&member),
            Some(json!({ "title": "Course" })),
        ))
        .await?;
    let course_id = json_body(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/v1/courses/{course_id}/lessons"),
            Some(&member),
            Some(json!({ "title": "Lesson", "sort_order": 0 })),
        ))
        .await?;
    let lesson_id = json_body(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(request(
            "POST",
            &format!("/api/v1/lessons/{lesson_id}/items"),
            Some(&member),
            Some(json!({ "title": "Broken quiz", "item_type": "question", "sort_order": 0 })),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["code"], "VALIDATION_FAILED");
    Ok(())
}
