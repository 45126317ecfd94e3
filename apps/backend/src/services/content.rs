//! Daily exercise generation with per-plan caching

use chrono::NaiveDate;
use practice_core::types::DEFAULT_GRADE_LEVEL;
use practice_core::{parse_validated, Module, Validate};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, Result};
use crate::models::User;
use crate::services::ai::{structured_chat, ChatMessage};
use crate::AppState;

/// Generated exercise and where it came from
#[derive(Debug)]
pub struct Generated<T> {
    pub content: T,
    pub cached: bool,
    pub fallback: bool,
}

/// Exercise source for one module
pub struct ExerciseSource<T> {
    pub module: Module,
    pub prompt: fn(&str) -> Vec<ChatMessage>,
    pub fallback: fn() -> T,
}

/// Return today's exercise for the module, generating and caching it on
/// the plan when missing.
///
/// A cached payload that no longer parses is regenerated. When generation
/// fails, development mode serves the canned exercise without caching it.
pub async fn exercise_for_today<T>(
    state: &AppState,
    student: &User,
    today: NaiveDate,
    source: ExerciseSource<T>,
) -> Result<Generated<T>>
where
    T: Serialize + DeserializeOwned + Validate,
{
    let module = source.module;
    let plan = state.db.find_or_create_plan(student.id, today, module).await?;

    if let Some(raw) = plan.ai_content.as_deref() {
        match parse_validated::<T>(raw) {
            Ok(content) => {
                return Ok(Generated {
                    content,
                    cached: true,
                    fallback: false,
                })
            }
            Err(e) => {
                tracing::warn!(plan_id = %plan.id, error = %e, "cached exercise invalid, regenerating")
            }
        }
    }

    let grade = student.grade.as_deref().unwrap_or(DEFAULT_GRADE_LEVEL);
    let messages = (source.prompt)(grade);

    let generated = match state.ai.provider_for(module).await {
        Ok(provider) => structured_chat::<T>(provider.as_ref(), &messages).await,
        Err(e) => Err(e),
    };

    match generated {
        Ok(content) => {
            let serialized =
                serde_json::to_string(&content).map_err(|e| ApiError::Internal(e.to_string()))?;
            state.db.set_plan_content(plan.id, &serialized).await?;
            tracing::info!(plan_id = %plan.id, module = %module, "generated exercise");
            Ok(Generated {
                content,
                cached: false,
                fallback: false,
            })
        }
        Err(e) if state.config.environment.is_development() => {
            tracing::warn!(module = %module, error = %e, "AI generation failed, serving fallback exercise");
            Ok(Generated {
                content: (source.fallback)(),
                cached: false,
                fallback: true,
            })
        }
        Err(e) => {
            tracing::error!(module = %module, error = %e, "AI generation failed");
            Err(e.into())
        }
    }
}
