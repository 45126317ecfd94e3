//! Health endpoints

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::models::HealthResponse;
use crate::AppState;

/// GET /health
pub async fn liveness() -> &'static str {
    "OK"
}

/// GET /api/health
pub async fn status(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let environment = state.config.environment.as_str().to_string();
    let qwen_key_configured = state.config.ai.qwen_api_key.is_some();
    let deepseek_key_configured = state.config.ai.deepseek_api_key.is_some();

    match state.db.get_health_counts().await {
        Ok(counts) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                timestamp: Utc::now(),
                environment,
                database: Some(counts),
                qwen_key_configured,
                deepseek_key_configured,
                error: None,
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "error".to_string(),
                    timestamp: Utc::now(),
                    environment,
                    database: None,
                    qwen_key_configured,
                    deepseek_key_configured,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
