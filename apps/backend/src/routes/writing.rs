//! Essay module endpoints

use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use practice_core::fallback;
use practice_core::schema::{ChineseEssayGrading, ChineseWritingTopic, EnglishEssayGrading, EnglishWritingTopic};
use practice_core::types::DEFAULT_GRADE_LEVEL;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::CurrentUser;
use crate::services::ai::prompts;
use crate::services::content::{exercise_for_today, ExerciseSource};
use crate::services::{grading, today};
use crate::AppState;

fn validate_essay(request: &EssaySubmitRequest) -> Result<()> {
    if request.content.trim().is_empty() {
        return Err(ApiError::BadRequest("content must not be empty".to_string()));
    }
    Ok(())
}

/// POST /api/training/chinese-writing/topic
pub async fn chinese_topic(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<TopicResponse<ChineseWritingTopic>>> {
    current.require_role(&[Role::Student])?;

    let generated = exercise_for_today(
        &state,
        &current.user,
        today(),
        ExerciseSource {
            module: Module::ChineseWriting,
            prompt: prompts::chinese_writing_topic,
            fallback: fallback::chinese_writing_topic,
        },
    )
    .await?;

    Ok(Json(TopicResponse {
        topic: generated.content,
        cached: generated.cached,
        fallback: generated.fallback,
    }))
}

/// POST /api/training/chinese-writing/submit
pub async fn chinese_submit(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    payload: std::result::Result<Json<EssaySubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse<ChineseEssayGrading>>> {
    current.require_role(&[Role::Student])?;
    let Json(request) = payload?;
    validate_essay(&request)?;

    let module = Module::ChineseWriting;
    let plan = grading::owned_plan(&state, current.id(), request.plan_id, module).await?;
    let grade = current.user.grade.as_deref().unwrap_or(DEFAULT_GRADE_LEVEL);

    let feedback = grading::essay_feedback(
        &state,
        module,
        prompts::chinese_writing_grading(&request.topic_title, &request.content, grade),
        fallback::chinese_essay_grading,
    )
    .await?;

    let response = grading::record_essay(&state, &plan, module, request.content, feedback).await?;
    Ok(Json(response))
}

/// POST /api/training/english-writing/topic
pub async fn english_topic(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<TopicResponse<EnglishWritingTopic>>> {
    current.require_role(&[Role::Student])?;

    let generated = exercise_for_today(
        &state,
        &current.user,
        today(),
        ExerciseSource {
            module: Module::EnglishWriting,
            prompt: prompts::english_writing_topic,
            fallback: fallback::english_writing_topic,
        },
    )
    .await?;

    Ok(Json(TopicResponse {
        topic: generated.content,
        cached: generated.cached,
        fallback: generated.fallback,
    }))
}

/// POST /api/training/english-writing/submit
pub async fn english_submit(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    payload: std::result::Result<Json<EssaySubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse<EnglishEssayGrading>>> {
    current.require_role(&[Role::Student])?;
    let Json(request) = payload?;
    validate_essay(&request)?;

    let module = Module::EnglishWriting;
    let plan = grading::owned_plan(&state, current.id(), request.plan_id, module).await?;
    let grade = current.user.grade.as_deref().unwrap_or(DEFAULT_GRADE_LEVEL);

    let feedback = grading::essay_feedback(
        &state,
        module,
        prompts::english_writing_grading(&request.topic_title, &request.content, grade),
        fallback::english_essay_grading,
    )
    .await?;

    let response = grading::record_essay(&state, &plan, module, request.content, feedback).await?;
    Ok(Json(response))
}
