//! Parent dashboard endpoints

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::CurrentUser;
use crate::routes::training::load_stats;
use crate::AppState;

const RECENT_RECORDS: usize = 5;

/// GET /api/parent/child
pub async fn child(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<ParentChildResponse>> {
    current.require_role(&[Role::Parent])?;

    let Some(child) = state.db.get_linked_child(current.id()).await? else {
        return Ok(Json(ParentChildResponse {
            child: None,
            stats: None,
            recent_records: Vec::new(),
        }));
    };

    let stats = load_stats(&state, child.id).await?;
    let recent_records = state
        .db
        .get_completed_plans(child.id)
        .await?
        .into_iter()
        .take(RECENT_RECORDS)
        .map(|plan| RecentRecord {
            date: plan.date,
            module: plan.module,
            score: plan.score,
            grade: plan.grade,
        })
        .collect();

    Ok(Json(ParentChildResponse {
        child: Some(child.to_summary()),
        stats: Some(stats),
        recent_records,
    }))
}
