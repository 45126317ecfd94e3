//! Reading module endpoints

use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use practice_core::fallback;
use practice_core::schema::{ClassicalPassage, EnglishPassage};
use practice_core::ItemSummary;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::CurrentUser;
use crate::services::ai::prompts;
use crate::services::content::{exercise_for_today, ExerciseSource};
use crate::services::{grading, today};
use crate::AppState;

fn validate_answers(request: &ReadingSubmitRequest) -> Result<()> {
    if request.answers.is_empty() {
        return Err(ApiError::BadRequest("answers must not be empty".to_string()));
    }
    let mut ids: Vec<u32> = request.answers.iter().map(|a| a.question_id).collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.len() != request.answers.len() {
        return Err(ApiError::BadRequest("duplicate question_id in answers".to_string()));
    }
    Ok(())
}

async fn submit(
    state: &AppState,
    current: &CurrentUser,
    module: Module,
    request: ReadingSubmitRequest,
) -> Result<SubmitResponse<ItemSummary>> {
    current.require_role(&[Role::Student])?;
    validate_answers(&request)?;

    let plan = grading::owned_plan(state, current.id(), request.plan_id, module).await?;
    let summary = grading::item_feedback(state, module, &request.answers).await?;
    grading::record_items(state, &plan, module, &request.answers, summary).await
}

/// POST /api/training/classical-reading/passage
pub async fn classical_passage(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<PassageResponse<ClassicalPassage>>> {
    current.require_role(&[Role::Student])?;

    let generated = exercise_for_today(
        &state,
        &current.user,
        today(),
        ExerciseSource {
            module: Module::ClassicalReading,
            prompt: prompts::classical_reading_passage,
            fallback: fallback::classical_passage,
        },
    )
    .await?;

    Ok(Json(PassageResponse {
        passage: generated.content,
        cached: generated.cached,
        fallback: generated.fallback,
    }))
}

/// POST /api/training/classical-reading/submit
pub async fn classical_submit(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    payload: std::result::Result<Json<ReadingSubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse<ItemSummary>>> {
    let Json(request) = payload?;
    let response = submit(&state, &current, Module::ClassicalReading, request).await?;
    Ok(Json(response))
}

/// POST /api/training/english-reading/passage
pub async fn english_passage(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<PassageResponse<EnglishPassage>>> {
    current.require_role(&[Role::Student])?;

    let generated = exercise_for_today(
        &state,
        &current.user,
        today(),
        ExerciseSource {
            module: Module::EnglishReading,
            prompt: prompts::english_reading_passage,
            fallback: fallback::english_passage,
        },
    )
    .await?;

    Ok(Json(PassageResponse {
        passage: generated.content,
        cached: generated.cached,
        fallback: generated.fallback,
    }))
}

/// POST /api/training/english-reading/submit
pub async fn english_submit(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    payload: std::result::Result<Json<ReadingSubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse<ItemSummary>>> {
    let Json(request) = payload?;
    let response = submit(&state, &current, Module::EnglishReading, request).await?;
    Ok(Json(response))
}
