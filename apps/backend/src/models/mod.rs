//! Database models and API types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

pub use practice_core::{
    mask_api_key, CompletedPlan, Module, PlanStatus, Role, StudyStats, WrongQuestionStatus,
};

// === Database Entity Types ===

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub phone: String,
    pub role: String,
    pub grade: Option<String>,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn to_summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            grade: self.grade.clone(),
        }
    }
}

/// Daily training plan stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTrainingPlan {
    pub id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub module: String,
    pub status: String,
    pub ai_content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbTrainingPlan {
    pub fn module(&self) -> Option<Module> {
        Module::parse(&self.module)
    }
}

/// Graded submission stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSubmission {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub student_id: Uuid,
    pub version: i32,
    pub content: String,
    pub score: Option<i32>,
    pub grade: Option<String>,
    pub feedback: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl DbSubmission {
    pub fn to_summary(&self) -> SubmissionSummary {
        SubmissionSummary {
            id: self.id,
            version: self.version,
            score: self.score,
            grade: self.grade.clone(),
            created_at: self.created_at,
        }
    }
}

/// Wrong-question notebook entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWrongQuestion {
    pub id: Uuid,
    pub student_id: Uuid,
    pub module: String,
    pub question_key: String,
    pub question_content: Value,
    pub correct_answer: String,
    pub student_answer: String,
    pub error_count: i32,
    pub consecutive_correct: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-module AI provider configuration
#[derive(Debug, Clone, FromRow)]
pub struct AiConfig {
    pub id: Uuid,
    pub module: String,
    pub provider: String,
    pub model_name: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub temperature: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AiConfig {
    /// Wire view of the config; the API key is never returned in full.
    pub fn to_masked(&self) -> MaskedAiConfig {
        MaskedAiConfig {
            id: self.id,
            module: self.module.clone(),
            provider: self.provider.clone(),
            model_name: self.model_name.clone(),
            api_key: mask_api_key(&self.api_key),
            base_url: self.base_url.clone(),
            temperature: self.temperature,
            updated_at: self.updated_at,
        }
    }
}

/// Classical text in the admin library
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClassicText {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub dynasty: String,
    pub content: String,
    pub translation: String,
    pub notes: String,
    pub difficulty: i32,
    pub grade_level: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Plan joined with its latest submission
#[derive(Debug, Clone, FromRow)]
pub struct PlanWithLatest {
    pub id: Uuid,
    pub date: NaiveDate,
    pub module: String,
    pub status: String,
    pub submission_id: Option<Uuid>,
    pub score: Option<i32>,
    pub grade: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl PlanWithLatest {
    pub fn to_completed(&self) -> Option<CompletedPlan> {
        Some(CompletedPlan {
            date: self.date,
            module: Module::parse(&self.module)?,
            score: self.score,
        })
    }

    pub fn to_history_record(&self) -> HistoryRecord {
        HistoryRecord {
            plan_id: self.id,
            date: self.date,
            module: self.module.clone(),
            status: self.status.clone(),
            score: self.score,
            grade: self.grade.clone(),
            submission_id: self.submission_id,
            submitted_at: self.submitted_at,
        }
    }
}

/// Admin view of a user with activity counts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminUser {
    pub id: Uuid,
    pub phone: String,
    pub role: String,
    pub grade: Option<String>,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub plan_count: i64,
    pub submission_count: i64,
}

// === Internal Write Types ===

/// Submission to persist once grading has finished
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub plan_id: Uuid,
    pub student_id: Uuid,
    pub module: Module,
    pub content: String,
    pub score: i32,
    pub grade: String,
    pub feedback: Value,
}

/// Outcome of one graded question, fed to the wrong-question notebook
#[derive(Debug, Clone)]
pub struct QuestionOutcome {
    pub question_key: String,
    pub question_content: Value,
    pub correct_answer: String,
    pub student_answer: String,
    pub is_correct: bool,
}

/// Key identifying a question across resubmissions of the same plan
pub fn question_key(plan_id: Uuid, question_id: u32) -> String {
    format!("{}_q{}", plan_id, question_id)
}

/// Partial update for an AI config row
#[derive(Debug, Clone, Default)]
pub struct AiConfigPatch {
    pub provider: Option<String>,
    pub model_name: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f64>,
}

// === API Request/Response Types ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: Option<String>,
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionSummary {
    pub id: Uuid,
    pub version: i32,
    pub score: Option<i32>,
    pub grade: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanView {
    pub id: Uuid,
    pub date: NaiveDate,
    pub module: String,
    pub status: String,
    pub latest_submission: Option<SubmissionSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub plan: PlanView,
    pub user: UserSummary,
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopicResponse<T> {
    pub topic: T,
    #[serde(default, skip_serializing_if = "is_false")]
    pub cached: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub fallback: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PassageResponse<T> {
    pub passage: T,
    #[serde(default, skip_serializing_if = "is_false")]
    pub cached: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub fallback: bool,
}

#[derive(Debug, Deserialize)]
pub struct EssaySubmitRequest {
    pub plan_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub topic_title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingAnswer {
    pub question_id: u32,
    #[serde(default)]
    pub question_type: String,
    pub question_text: String,
    pub reference_answer: String,
    pub student_answer: String,
}

#[derive(Debug, Deserialize)]
pub struct ReadingSubmitRequest {
    pub plan_id: Uuid,
    pub answers: Vec<ReadingAnswer>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmittedVersion {
    pub id: Uuid,
    pub version: i32,
    pub score: Option<i32>,
    pub grade: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse<F> {
    pub submission: SubmittedVersion,
    pub feedback: F,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionDetail {
    pub id: Uuid,
    pub content: String,
    pub version: i32,
    pub score: Option<i32>,
    pub grade: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanSummary {
    pub id: Uuid,
    pub date: NaiveDate,
    pub module: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionDetailResponse {
    pub submission: SubmissionDetail,
    pub feedback: Option<Value>,
    pub plan: PlanSummary,
    pub versions: Vec<SubmissionSummary>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub month: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub module: String,
    pub status: String,
    pub score: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub modules: Vec<CalendarEntry>,
    pub has_completed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
    pub completed_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub module: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub plan_id: Uuid,
    pub date: NaiveDate,
    pub module: String,
    pub status: String,
    pub score: Option<i32>,
    pub grade: Option<String>,
    pub submission_id: Option<Uuid>,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub records: Vec<HistoryRecord>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecentRecord {
    pub date: NaiveDate,
    pub module: String,
    pub score: Option<i32>,
    pub grade: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParentChildResponse {
    pub child: Option<UserSummary>,
    pub stats: Option<StudyStats>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recent_records: Vec<RecentRecord>,
}

#[derive(Debug, Deserialize)]
pub struct MistakesQuery {
    pub module: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct ModuleCount {
    pub module: String,
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MistakesResponse {
    pub mistakes: Vec<DbWrongQuestion>,
    pub stats: Vec<ModuleCount>,
    pub total: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMistakeRequest {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MaskedAiConfig {
    pub id: Uuid,
    pub module: String,
    pub provider: String,
    pub model_name: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub temperature: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AiConfigListResponse {
    pub configs: Vec<MaskedAiConfig>,
}

/// Partial update; an empty `base_url` clears the override.
#[derive(Debug, Deserialize)]
pub struct UpdateAiConfigRequest {
    pub module: Option<String>,
    pub provider: Option<String>,
    pub model_name: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminStatsResponse {
    pub total_students: i64,
    pub total_plans: i64,
    pub total_completed: i64,
    pub total_texts: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminUsersResponse {
    pub users: Vec<AdminUser>,
}

#[derive(Debug, Deserialize)]
pub struct TextsQuery {
    pub search: Option<String>,
    pub grade: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TextsResponse {
    pub texts: Vec<ClassicText>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct CreateTextRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
    pub dynasty: Option<String>,
    pub translation: Option<String>,
    pub notes: Option<String>,
    pub difficulty: Option<i32>,
    pub grade_level: Option<String>,
}

/// Validated fields for a new classical text
#[derive(Debug, Clone)]
pub struct NewClassicText {
    pub title: String,
    pub author: String,
    pub content: String,
    pub dynasty: String,
    pub translation: String,
    pub notes: String,
    pub difficulty: i32,
    pub grade_level: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTextRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
    pub dynasty: Option<String>,
    pub translation: Option<String>,
    pub notes: Option<String>,
    pub difficulty: Option<i32>,
    pub grade_level: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCounts {
    pub users: i64,
    pub ai_configs: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<HealthCounts>,
    pub qwen_key_configured: bool,
    pub deepseek_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
