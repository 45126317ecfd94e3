//! Submission grading and persistence

use practice_core::grading::round_score;
use practice_core::{fallback, GradedItem, ItemGrading, ItemSummary, Module, ScoredFeedback, Validate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::ai::{prompts, structured_chat, AiError, ChatMessage, ChatProvider};
use crate::AppState;

/// Load a plan the student is allowed to submit against.
///
/// Missing plans and plans of other students are both rejected as forbidden.
pub async fn owned_plan(
    state: &AppState,
    student_id: Uuid,
    plan_id: Uuid,
    module: Module,
) -> Result<DbTrainingPlan> {
    let plan = state
        .db
        .get_plan(plan_id)
        .await?
        .filter(|plan| plan.student_id == student_id)
        .ok_or_else(|| ApiError::Forbidden(format!("Plan {} is not available", plan_id)))?;

    if plan.module() != Some(module) {
        return Err(ApiError::BadRequest(format!(
            "Plan {} belongs to module {}",
            plan_id, plan.module
        )));
    }

    Ok(plan)
}

/// Grade a whole essay, substituting the canned result in development
pub async fn essay_feedback<T>(
    state: &AppState,
    module: Module,
    messages: Vec<ChatMessage>,
    fallback: fn() -> T,
) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    let graded = match state.ai.provider_for(module).await {
        Ok(provider) => structured_chat::<T>(provider.as_ref(), &messages).await,
        Err(e) => Err(e),
    };

    match graded {
        Ok(feedback) => Ok(feedback),
        Err(e) if state.config.environment.is_development() => {
            tracing::warn!(module = %module, error = %e, "AI grading failed, using fallback feedback");
            Ok(fallback())
        }
        Err(e) => {
            tracing::error!(module = %module, error = %e, "AI grading failed");
            Err(e.into())
        }
    }
}

async fn grade_item(
    provider: &dyn ChatProvider,
    module: Module,
    answer: &ReadingAnswer,
) -> std::result::Result<ItemGrading, AiError> {
    let messages = match module {
        Module::EnglishReading => prompts::english_item_grading(
            &answer.question_type,
            &answer.question_text,
            &answer.reference_answer,
            &answer.student_answer,
        ),
        _ => prompts::classical_item_grading(
            &answer.question_type,
            &answer.question_text,
            &answer.reference_answer,
            &answer.student_answer,
        ),
    };

    let grading: ItemGrading = structured_chat(provider, &messages).await?;
    grading.validate_for(module)?;
    Ok(grading)
}

fn fallback_item(module: Module, answer: &ReadingAnswer) -> ItemGrading {
    match module {
        Module::EnglishReading => fallback::english_item(&answer.student_answer, &answer.reference_answer),
        _ => fallback::classical_item(&answer.student_answer, &answer.reference_answer),
    }
}

/// Grade each answer and aggregate the result.
///
/// In development a failing item falls back to the canned rule for that
/// item only; in production the first failure aborts the submission.
pub async fn item_feedback(
    state: &AppState,
    module: Module,
    answers: &[ReadingAnswer],
) -> Result<ItemSummary> {
    let development = state.config.environment.is_development();

    let provider = match state.ai.provider_for(module).await {
        Ok(provider) => Some(provider),
        Err(e) if development => {
            tracing::warn!(module = %module, error = %e, "no AI provider, grading with fallback rules");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let mut results = Vec::with_capacity(answers.len());
    for answer in answers {
        let grading = match &provider {
            Some(provider) => match grade_item(provider.as_ref(), module, answer).await {
                Ok(grading) => grading,
                Err(e) if development => {
                    tracing::warn!(
                        module = %module,
                        question_id = answer.question_id,
                        error = %e,
                        "AI item grading failed, using fallback rule"
                    );
                    fallback_item(module, answer)
                }
                Err(e) => return Err(e.into()),
            },
            None => fallback_item(module, answer),
        };

        results.push(GradedItem {
            question_id: answer.question_id,
            grading,
        });
    }

    Ok(ItemSummary::aggregate(module, results))
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal(e.to_string()))
}

fn submitted(submission: &DbSubmission) -> SubmittedVersion {
    SubmittedVersion {
        id: submission.id,
        version: submission.version,
        score: submission.score,
        grade: submission.grade.clone(),
    }
}

/// Store an essay submission as the plan's next version
pub async fn record_essay<T>(
    state: &AppState,
    plan: &DbTrainingPlan,
    module: Module,
    content: String,
    feedback: T,
) -> Result<SubmitResponse<T>>
where
    T: ScoredFeedback + Serialize,
{
    let new = NewSubmission {
        plan_id: plan.id,
        student_id: plan.student_id,
        module,
        content,
        score: round_score(feedback.total_score()),
        grade: feedback.grade().to_string(),
        feedback: to_json(&feedback)?,
    };

    let submission = state.db.record_submission(&new, &[]).await?;
    tracing::info!(
        plan_id = %plan.id,
        version = submission.version,
        score = new.score,
        "essay graded"
    );

    Ok(SubmitResponse {
        submission: submitted(&submission),
        feedback,
    })
}

/// The grader's answer, or the submitted reference when the grader left it blank
fn stored_answer(grading: &ItemGrading, answer: &ReadingAnswer) -> String {
    if grading.correct_answer.trim().is_empty() {
        answer.reference_answer.clone()
    } else {
        grading.correct_answer.clone()
    }
}

/// Store a reading submission and update the wrong-question notebook
pub async fn record_items(
    state: &AppState,
    plan: &DbTrainingPlan,
    module: Module,
    answers: &[ReadingAnswer],
    summary: ItemSummary,
) -> Result<SubmitResponse<ItemSummary>> {
    let outcomes: Vec<QuestionOutcome> = answers
        .iter()
        .filter_map(|answer| {
            let result = summary
                .results
                .iter()
                .find(|r| r.question_id == answer.question_id)?;
            Some(QuestionOutcome {
                question_key: question_key(plan.id, answer.question_id),
                question_content: json!({
                    "question_id": answer.question_id,
                    "question_type": answer.question_type,
                    "question_text": answer.question_text,
                }),
                correct_answer: stored_answer(&result.grading, answer),
                student_answer: answer.student_answer.clone(),
                is_correct: result.grading.is_correct,
            })
        })
        .collect();

    let new = NewSubmission {
        plan_id: plan.id,
        student_id: plan.student_id,
        module,
        content: to_json(&answers)?.to_string(),
        score: summary.total_score,
        grade: summary.grade.clone(),
        feedback: to_json(&summary)?,
    };

    let submission = state.db.record_submission(&new, &outcomes).await?;
    tracing::info!(
        plan_id = %plan.id,
        version = submission.version,
        score = new.score,
        wrong = summary.incorrect().count(),
        "reading answers graded"
    );

    Ok(SubmitResponse {
        submission: submitted(&submission),
        feedback: summary,
    })
}
