//! Core training logic shared by the backend.
//!
//! Provides:
//! - Module, role and status types
//! - Weekday module rotation for daily plans
//! - Streak, weekly and per-module statistics
//! - Score aggregation and letter grades
//! - Schemas for AI generated content and grading results
//! - Canned payloads used when the AI provider is unavailable in development

pub mod error;
pub mod fallback;
pub mod grading;
pub mod masking;
pub mod schedule;
pub mod schema;
pub mod stats;
pub mod types;

pub use error::{CoreError, Result};
pub use grading::{letter_grade, GradedItem, ItemSummary};
pub use masking::mask_api_key;
pub use schedule::module_for_weekday;
pub use schema::{parse_validated, ItemGrading, ScoredFeedback, Validate};
pub use stats::{compute_streak, CompletedPlan, ModuleStats, StudyStats};
pub use types::{Module, PlanStatus, Role, WrongQuestionStatus};
