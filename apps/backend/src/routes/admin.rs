//! Admin endpoints
//!
//! Every handler requires the admin role.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use practice_core::types::DEFAULT_GRADE_LEVEL;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::CurrentUser;
use crate::services::ai::ProviderKind;
use crate::AppState;

const DEFAULT_DIFFICULTY: i32 = 3;

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn check_difficulty(difficulty: Option<i32>) -> Result<()> {
    match difficulty {
        Some(d) if !(1..=5).contains(&d) => Err(ApiError::BadRequest(format!(
            "difficulty must be between 1 and 5, got {}",
            d
        ))),
        _ => Ok(()),
    }
}

/// GET /api/admin/ai-config
pub async fn list_ai_configs(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<AiConfigListResponse>> {
    current.require_role(&[Role::Admin])?;

    let configs = state.db.list_ai_configs().await?;
    Ok(Json(AiConfigListResponse {
        configs: configs.iter().map(AiConfig::to_masked).collect(),
    }))
}

/// PUT /api/admin/ai-config
pub async fn update_ai_config(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    payload: std::result::Result<Json<UpdateAiConfigRequest>, JsonRejection>,
) -> Result<Json<MaskedAiConfig>> {
    current.require_role(&[Role::Admin])?;
    let Json(request) = payload?;

    let module = non_empty(request.module)
        .ok_or_else(|| ApiError::BadRequest("module is required".to_string()))?;

    if let Some(provider) = request.provider.as_deref() {
        ProviderKind::parse(provider)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown provider '{}'", provider)))?;
    }
    if let Some(temperature) = request.temperature {
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ApiError::BadRequest(format!(
                "temperature must be between 0 and 2, got {}",
                temperature
            )));
        }
    }

    let patch = AiConfigPatch {
        provider: request.provider,
        model_name: non_empty(request.model_name),
        api_key: non_empty(request.api_key),
        base_url: request.base_url.map(|url| url.trim().to_string()),
        temperature: request.temperature,
    };

    let config = state
        .db
        .update_ai_config(&module, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("AI config for {}", module)))?;

    tracing::info!(module = %module, provider = %config.provider, model = %config.model_name, "AI config updated");

    Ok(Json(config.to_masked()))
}

/// GET /api/admin/stats
pub async fn stats(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<AdminStatsResponse>> {
    current.require_role(&[Role::Admin])?;
    Ok(Json(state.db.get_admin_stats().await?))
}

/// GET /api/admin/users
pub async fn users(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<AdminUsersResponse>> {
    current.require_role(&[Role::Admin])?;
    let users = state.db.list_users_with_counts().await?;
    Ok(Json(AdminUsersResponse { users }))
}

/// GET /api/admin/texts?search=&grade=
pub async fn list_texts(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    query: std::result::Result<Query<TextsQuery>, QueryRejection>,
) -> Result<Json<TextsResponse>> {
    current.require_role(&[Role::Admin])?;
    let Query(query) = query?;

    let search = non_empty(query.search);
    let grade = non_empty(query.grade);
    let texts = state
        .db
        .list_texts(search.as_deref(), grade.as_deref())
        .await?;

    Ok(Json(TextsResponse {
        total: texts.len(),
        texts,
    }))
}

/// POST /api/admin/texts
pub async fn create_text(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    payload: std::result::Result<Json<CreateTextRequest>, JsonRejection>,
) -> Result<Json<ClassicText>> {
    current.require_role(&[Role::Admin])?;
    let Json(request) = payload?;
    check_difficulty(request.difficulty)?;

    let (Some(title), Some(author), Some(content)) = (
        non_empty(request.title),
        non_empty(request.author),
        non_empty(request.content),
    ) else {
        return Err(ApiError::BadRequest(
            "title, author and content are required".to_string(),
        ));
    };

    let text = NewClassicText {
        title,
        author,
        content,
        dynasty: request.dynasty.unwrap_or_default(),
        translation: request.translation.unwrap_or_default(),
        notes: request.notes.unwrap_or_else(|| "{}".to_string()),
        difficulty: request.difficulty.unwrap_or(DEFAULT_DIFFICULTY),
        grade_level: non_empty(request.grade_level)
            .unwrap_or_else(|| DEFAULT_GRADE_LEVEL.to_string()),
    };

    let created = state.db.create_text(&text).await?;
    tracing::info!(text_id = %created.id, title = %created.title, "classic text created");

    Ok(Json(created))
}

/// PUT /api/admin/texts/:id
pub async fn update_text(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    payload: std::result::Result<Json<UpdateTextRequest>, JsonRejection>,
) -> Result<Json<ClassicText>> {
    current.require_role(&[Role::Admin])?;
    let Json(request) = payload?;
    check_difficulty(request.difficulty)?;

    for (field, value) in [
        ("title", &request.title),
        ("author", &request.author),
        ("content", &request.content),
    ] {
        if matches!(value, Some(v) if v.trim().is_empty()) {
            return Err(ApiError::BadRequest(format!("{} must not be empty", field)));
        }
    }

    let updated = state
        .db
        .update_text(id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Text {}", id)))?;

    Ok(Json(updated))
}

/// DELETE /api/admin/texts/:id
pub async fn delete_text(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>> {
    current.require_role(&[Role::Admin])?;

    if !state.db.delete_text(id).await? {
        return Err(ApiError::NotFound(format!("Text {}", id)));
    }

    tracing::info!(text_id = %id, "classic text deleted");
    Ok(Json(DeleteResponse { success: true }))
}
