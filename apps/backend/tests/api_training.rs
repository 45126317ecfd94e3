//! Daily plan and aggregation API tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL environment variable before running.

mod common;

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::{Datelike, Local};
use pretty_assertions::assert_eq;

use common::{fixtures, ScriptedProvider, TestContext};
use practice_backend::models::Role;

/// Today's plan is created once and returned on every call.
#[tokio::test]
#[ignore = "requires database"]
async fn test_today_plan_is_stable() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let student = ctx.create_student().await;

    let first = server
        .get("/api/training/today")
        .add_query_param("user_id", student.id)
        .await;
    first.assert_status_ok();
    let first: serde_json::Value = first.json();

    let second: serde_json::Value = server
        .get("/api/training/today")
        .add_query_param("user_id", student.id)
        .await
        .json();

    assert_eq!(first["plan"]["id"], second["plan"]["id"]);
    assert_eq!(first["plan"]["status"], "pending");
    assert!(first["plan"]["latest_submission"].is_null());
    assert_eq!(first["user"]["grade"], "初一");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM training_plans WHERE student_id = $1")
        .bind(student.id)
        .fetch_one(ctx.db.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);

    // Cleanup
    ctx.cleanup_user(student.id).await;
}

/// Concurrent find-or-create yields a single plan row.
#[tokio::test]
#[ignore = "requires database"]
async fn test_today_plan_concurrent_requests() {
    let ctx = TestContext::new().await;
    let student = ctx.create_student().await;
    let today = Local::now().date_naive();
    let module = practice_core::schedule::module_for_date(today);

    let (a, b) = tokio::join!(
        ctx.db.find_or_create_plan(student.id, today, module),
        ctx.db.find_or_create_plan(student.id, today, module),
    );
    assert_eq!(a.unwrap().id, b.unwrap().id);

    // Cleanup
    ctx.cleanup_user(student.id).await;
}

/// The today route is only for students.
#[tokio::test]
#[ignore = "requires database"]
async fn test_today_plan_rejects_admin() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .get("/api/training/today")
        .add_query_param("role", "admin")
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "forbidden");
}

/// Unknown role names are rejected.
#[tokio::test]
#[ignore = "requires database"]
async fn test_unknown_role_rejected() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .get("/api/training/today")
        .add_query_param("role", "teacher")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

/// Production mode has no session auth and rejects every user route.
#[tokio::test]
#[ignore = "requires database"]
async fn test_production_requires_session() {
    let ctx = TestContext::production(ScriptedProvider::failing()).await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/api/training/today").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    // Health stays public
    server.get("/health").await.assert_status_ok();
}

/// Stats for a new student are all zero.
#[tokio::test]
#[ignore = "requires database"]
async fn test_stats_empty() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let student = ctx.create_student().await;

    let response = server
        .get("/api/training/stats")
        .add_query_param("user_id", student.id)
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["streak"], 0);
    assert_eq!(body["weekly_count"], 0);
    assert_eq!(body["total_completed"], 0);
    assert_eq!(body["wrong_count"], 0);
    assert_eq!(body["by_module"].as_object().unwrap().len(), 4);
    assert_eq!(body["by_module"]["english_reading"]["count"], 0);
    assert_eq!(body["by_module"]["english_reading"]["recent5"], serde_json::json!([]));

    // Cleanup
    ctx.cleanup_user(student.id).await;
}

/// Completing plans on consecutive days builds a streak.
#[tokio::test]
#[ignore = "requires database"]
async fn test_stats_streak_after_submissions() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let student = ctx.create_student().await;
    let today = Local::now().date_naive();

    for days_ago in 0..3 {
        let date = today - chrono::Duration::days(days_ago);
        let plan = ctx
            .db
            .find_or_create_plan(student.id, date, practice_core::Module::ChineseWriting)
            .await
            .unwrap();
        server
            .post("/api/training/chinese-writing/submit")
            .add_query_param("user_id", student.id)
            .json(&fixtures::essay_submission(plan.id, "今天我学会了骑自行车。"))
            .await
            .assert_status_ok();
    }

    let body: serde_json::Value = server
        .get("/api/training/stats")
        .add_query_param("user_id", student.id)
        .await
        .json();

    assert_eq!(body["streak"], 3);
    assert_eq!(body["total_completed"], 3);
    // Fallback grading scores 82
    assert_eq!(body["by_module"]["chinese_writing"]["avg"], 82);
    assert_eq!(body["by_module"]["chinese_writing"]["count"], 3);

    // Cleanup
    ctx.cleanup_user(student.id).await;
}

/// Parents read their linked child's stats through the same route.
#[tokio::test]
#[ignore = "requires database"]
async fn test_stats_as_parent() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let student = ctx.create_student().await;
    let parent = ctx.create_parent_of(student.id).await;

    let response = server
        .get("/api/training/stats")
        .add_query_param("user_id", parent.id)
        .await;
    response.assert_status_ok();

    let orphan = ctx.create_user(Role::Parent, None).await;
    let response = server
        .get("/api/training/stats")
        .add_query_param("user_id", orphan.id)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    // Cleanup
    ctx.cleanup_user(parent.id).await;
    ctx.cleanup_user(orphan.id).await;
    ctx.cleanup_user(student.id).await;
}

/// Calendar lists the month's plans grouped by day.
#[tokio::test]
#[ignore = "requires database"]
async fn test_calendar_current_month() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let student = ctx.create_student().await;
    let today = Local::now().date_naive();

    server
        .get("/api/training/today")
        .add_query_param("user_id", student.id)
        .await
        .assert_status_ok();

    let response = server
        .get("/api/training/calendar")
        .add_query_param("user_id", student.id)
        .add_query_param("month", "not-a-month")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["year"], today.year());
    assert_eq!(body["month"], today.month());
    assert_eq!(body["days"].as_array().unwrap().len(), 1);
    assert_eq!(body["days"][0]["has_completed"], false);
    assert_eq!(body["completed_count"], 0);

    // Cleanup
    ctx.cleanup_user(student.id).await;
}

/// History paginates completed plans and validates the module filter.
#[tokio::test]
#[ignore = "requires database"]
async fn test_history_pagination() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let student = ctx.create_student().await;
    let today = Local::now().date_naive();

    for days_ago in 0..3 {
        let plan = ctx
            .db
            .find_or_create_plan(
                student.id,
                today - chrono::Duration::days(days_ago),
                practice_core::Module::EnglishWriting,
            )
            .await
            .unwrap();
        server
            .post("/api/training/english-writing/submit")
            .add_query_param("user_id", student.id)
            .json(&fixtures::essay_submission(plan.id, "My best friend is Tom."))
            .await
            .assert_status_ok();
    }

    let response = server
        .get("/api/training/history")
        .add_query_param("user_id", student.id)
        .add_query_param("page", 2)
        .add_query_param("page_size", 2)
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 3);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["page"], 2);
    assert_eq!(body["records"].as_array().unwrap().len(), 1);
    assert_eq!(body["records"][0]["module"], "english_writing");

    let filtered: serde_json::Value = server
        .get("/api/training/history")
        .add_query_param("user_id", student.id)
        .add_query_param("module", "chinese_writing")
        .await
        .json();
    assert_eq!(filtered["total"], 0);

    // A page far past the end is empty, not an error
    let response = server
        .get("/api/training/history")
        .add_query_param("user_id", student.id)
        .add_query_param("page", i64::MAX)
        .add_query_param("page_size", 50)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 3);
    assert_eq!(body["records"], serde_json::json!([]));

    server
        .get("/api/training/history")
        .add_query_param("user_id", student.id)
        .add_query_param("module", "math")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Cleanup
    ctx.cleanup_user(student.id).await;
}

/// Liveness and status endpoints, served with permissive CORS.
#[tokio::test]
#[ignore = "requires database"]
async fn test_health() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .get("/health")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:3000"))
        .await;
    response.assert_status_ok();
    response.assert_text("OK");
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&HeaderValue::from_static("*"))
    );

    let response = server.get("/api/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["environment"], "development");
    assert!(body["database"]["users"].as_i64().unwrap() >= 3);
}
