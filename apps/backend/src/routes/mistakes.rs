//! Wrong-question notebook endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::{resolve_student, CurrentUser};
use crate::AppState;

/// GET /api/mistakes?module=&status=
pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    query: std::result::Result<Query<MistakesQuery>, QueryRejection>,
) -> Result<Json<MistakesResponse>> {
    let Query(query) = query?;
    let student = resolve_student(&state, &current).await?;

    let module = match query.module.as_deref() {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(Module::try_from(raw)?),
    };
    let status = match query.status.as_deref() {
        None | Some("") => WrongQuestionStatus::Active,
        Some(raw) => WrongQuestionStatus::parse(raw)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown status '{}'", raw)))?,
    };

    let mistakes = state
        .db
        .list_wrong_questions(student.id, module, status)
        .await?;
    let stats = state.db.count_active_wrong_by_module(student.id).await?;
    let total: i64 = stats.iter().map(|s| s.count).sum();

    Ok(Json(MistakesResponse {
        mistakes,
        stats,
        total,
    }))
}

/// PATCH /api/mistakes/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    payload: std::result::Result<Json<UpdateMistakeRequest>, JsonRejection>,
) -> Result<Json<DbWrongQuestion>> {
    current.require_role(&[Role::Student])?;
    let Json(request) = payload?;

    let status = WrongQuestionStatus::parse(&request.status)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown status '{}'", request.status)))?;

    let mistake = state
        .db
        .update_wrong_question_status(id, current.id(), status)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Mistake {}", id)))?;

    tracing::info!(mistake_id = %id, status = status.as_str(), "mistake status updated");

    Ok(Json(mistake))
}
