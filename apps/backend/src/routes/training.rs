//! Training plan endpoints

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Extension, Json,
};
use chrono::{Datelike, NaiveDate};
use practice_core::schedule::module_for_date;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::{resolve_student, CurrentUser};
use crate::services::today;
use crate::AppState;

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 50;

/// GET /api/training/today
pub async fn today_plan(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<TodayResponse>> {
    current.require_role(&[Role::Student])?;

    let date = today();
    let module = module_for_date(date);
    let plan = state
        .db
        .find_or_create_plan(current.id(), date, module)
        .await?;
    let latest = state.db.get_latest_submission(plan.id).await?;

    tracing::debug!(plan_id = %plan.id, module = %module, "resolved today's plan");

    Ok(Json(TodayResponse {
        plan: PlanView {
            id: plan.id,
            date: plan.date,
            module: plan.module,
            status: plan.status,
            latest_submission: latest.as_ref().map(DbSubmission::to_summary),
        },
        user: current.user.to_summary(),
    }))
}

/// GET /api/training/stats
pub async fn stats(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<StudyStats>> {
    let student = resolve_student(&state, &current).await?;
    let stats = load_stats(&state, student.id).await?;
    Ok(Json(stats))
}

/// Statistics for one student as of today
pub async fn load_stats(state: &AppState, student_id: Uuid) -> Result<StudyStats> {
    let plans = state.db.get_completed_plans(student_id).await?;
    let completed: Vec<CompletedPlan> = plans.iter().filter_map(PlanWithLatest::to_completed).collect();
    let wrong_count = state.db.count_active_wrong(student_id).await?;

    Ok(StudyStats::compute(&completed, today(), wrong_count))
}

/// Parse `YYYY-MM`; anything else yields `None`
pub fn parse_month(raw: &str) -> Option<(i32, u32)> {
    let (year, month) = raw.trim().split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)?;
    Some((year, month))
}

/// First and last day of a month
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

/// GET /api/training/calendar?month=YYYY-MM
pub async fn calendar(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    query: std::result::Result<Query<CalendarQuery>, QueryRejection>,
) -> Result<Json<CalendarResponse>> {
    let Query(query) = query?;
    let student = resolve_student(&state, &current).await?;

    let now = today();
    let (year, month) = query
        .month
        .as_deref()
        .and_then(parse_month)
        .unwrap_or((now.year(), now.month()));
    let (first, last) = month_bounds(year, month)
        .ok_or_else(|| ApiError::Parse(format!("invalid month {}-{}", year, month)))?;

    let plans = state.db.get_plans_between(student.id, first, last).await?;

    let mut days: Vec<CalendarDay> = Vec::new();
    for plan in plans {
        let entry = CalendarEntry {
            module: plan.module.clone(),
            status: plan.status.clone(),
            score: plan.score,
        };
        let completed = plan.status == PlanStatus::Completed.as_str();

        match days.last_mut() {
            Some(day) if day.date == plan.date => {
                day.has_completed |= completed;
                day.modules.push(entry);
            }
            _ => days.push(CalendarDay {
                date: plan.date,
                modules: vec![entry],
                has_completed: completed,
            }),
        }
    }

    let completed_count = days.iter().filter(|d| d.has_completed).count();

    Ok(Json(CalendarResponse {
        year,
        month,
        days,
        completed_count,
    }))
}

/// GET /api/training/history?page=&page_size=&module=
pub async fn history(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    query: std::result::Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>> {
    let Query(query) = query?;
    let student = resolve_student(&state, &current).await?;

    let page = query.page.unwrap_or(1).max(1);
    let page_size = query
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let module = match query.module.as_deref() {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(Module::try_from(raw)?),
    };

    // Pages past i64 range read as past the end
    let offset = (page - 1).checked_mul(page_size).unwrap_or(i64::MAX);

    let (plans, total) = state
        .db
        .get_history_page(student.id, module, page_size, offset)
        .await?;

    Ok(Json(HistoryResponse {
        records: plans.iter().map(PlanWithLatest::to_history_record).collect(),
        total,
        page,
        page_size,
        total_pages: (total + page_size - 1) / page_size,
    }))
}

/// GET /api/training/submissions/:id
pub async fn submission_detail(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(submission_id): Path<Uuid>,
) -> Result<Json<SubmissionDetailResponse>> {
    let student = resolve_student(&state, &current).await?;

    let submission = state
        .db
        .get_submission(submission_id)
        .await?
        .filter(|s| s.student_id == student.id)
        .ok_or_else(|| ApiError::NotFound(format!("Submission {}", submission_id)))?;

    let plan = state
        .db
        .get_plan(submission.plan_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Plan {}", submission.plan_id)))?;

    let versions = state.db.get_plan_submissions(plan.id).await?;

    Ok(Json(SubmissionDetailResponse {
        feedback: submission.feedback.clone(),
        submission: SubmissionDetail {
            id: submission.id,
            content: submission.content,
            version: submission.version,
            score: submission.score,
            grade: submission.grade,
            created_at: submission.created_at,
        },
        plan: PlanSummary {
            id: plan.id,
            date: plan.date,
            module: plan.module,
            status: plan.status,
        },
        versions: versions.iter().map(DbSubmission::to_summary).collect(),
    }))
}
