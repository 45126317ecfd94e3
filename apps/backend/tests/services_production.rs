//! Production-mode AI failure handling at the service layer.
//!
//! Production has no development identity stub, so these call the services
//! directly instead of going through the router.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL environment variable before running.

mod common;

use chrono::Local;
use pretty_assertions::assert_eq;

use common::{ScriptedProvider, TestContext};
use practice_backend::error::ApiError;
use practice_backend::models::ReadingAnswer;
use practice_backend::services::ai::prompts;
use practice_backend::services::content::{exercise_for_today, ExerciseSource};
use practice_backend::services::grading;
use practice_core::{fallback, Module};

/// Topic generation fails without caching anything on the plan.
#[tokio::test]
#[ignore = "requires database"]
async fn test_generation_failure_is_not_cached() {
    let ctx = TestContext::production(ScriptedProvider::failing()).await;
    let state = ctx.state();
    let student = ctx.create_student().await;
    let today = Local::now().date_naive();

    let result = exercise_for_today(
        &state,
        &student,
        today,
        ExerciseSource {
            module: Module::ChineseWriting,
            prompt: prompts::chinese_writing_topic,
            fallback: fallback::chinese_writing_topic,
        },
    )
    .await;

    assert!(matches!(result, Err(ApiError::Ai(_))));
    assert_eq!(ctx.provider.calls(), 1);

    let plan = ctx
        .db
        .find_or_create_plan(student.id, today, Module::ChineseWriting)
        .await
        .unwrap();
    assert!(plan.ai_content.is_none());

    // Cleanup
    ctx.cleanup_user(student.id).await;
}

/// Essay grading fails without a submission being written.
#[tokio::test]
#[ignore = "requires database"]
async fn test_essay_grading_failure_persists_nothing() {
    let ctx = TestContext::production(ScriptedProvider::failing()).await;
    let state = ctx.state();
    let student = ctx.create_student().await;
    let module = Module::ChineseWriting;
    let plan = ctx
        .db
        .find_or_create_plan(student.id, Local::now().date_naive(), module)
        .await
        .unwrap();

    let owned = grading::owned_plan(&state, student.id, plan.id, module)
        .await
        .unwrap();
    let result = grading::essay_feedback(
        &state,
        module,
        prompts::chinese_writing_grading("我的妈妈", "妈妈每天很早起床。", "初一"),
        fallback::chinese_essay_grading,
    )
    .await;

    assert!(matches!(result, Err(ApiError::Ai(_))));
    assert!(ctx.db.get_plan_submissions(owned.id).await.unwrap().is_empty());

    let plan = ctx.db.get_plan(plan.id).await.unwrap().unwrap();
    assert_eq!(plan.status, "pending");

    // Cleanup
    ctx.cleanup_user(student.id).await;
}

/// Item grading aborts on the first failure instead of falling back.
#[tokio::test]
#[ignore = "requires database"]
async fn test_item_grading_failure_aborts() {
    let ctx = TestContext::production(ScriptedProvider::failing()).await;
    let state = ctx.state();
    let student = ctx.create_student().await;
    let plan = ctx
        .db
        .find_or_create_plan(student.id, Local::now().date_naive(), Module::EnglishReading)
        .await
        .unwrap();

    let answers: Vec<ReadingAnswer> = (1..=2)
        .map(|question_id| ReadingAnswer {
            question_id,
            question_type: "fill_blank".to_string(),
            question_text: format!("Question {}", question_id),
            reference_answer: "cafeteria".to_string(),
            student_answer: "library".to_string(),
        })
        .collect();

    let result = grading::item_feedback(&state, Module::EnglishReading, &answers).await;

    assert!(matches!(result, Err(ApiError::Ai(_))));
    assert_eq!(ctx.provider.calls(), 1);
    assert!(ctx.db.get_plan_submissions(plan.id).await.unwrap().is_empty());

    let mistakes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wrong_questions WHERE student_id = $1")
        .bind(student.id)
        .fetch_one(ctx.db.pool())
        .await
        .unwrap();
    assert_eq!(mistakes, 0);

    // Cleanup
    ctx.cleanup_user(student.id).await;
}
