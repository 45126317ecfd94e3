//! Study statistics derived from completed plans.
//!
//! All computations are pure: callers load the completed plans and pass in
//! the calendar date they consider "today".

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::Module;

/// Number of most recent scores kept per module.
const RECENT_SCORES: usize = 5;

/// A completed plan with its latest submission score.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedPlan {
    pub date: NaiveDate,
    pub module: Module,
    pub score: Option<i32>,
}

/// Score summary for one module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleStats {
    pub avg: i32,
    pub max: i32,
    pub count: usize,
    pub recent5: Vec<i32>,
}

/// Dashboard statistics for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyStats {
    pub streak: u32,
    pub weekly_count: usize,
    pub total_completed: usize,
    pub wrong_count: i64,
    pub by_module: BTreeMap<Module, ModuleStats>,
}

impl StudyStats {
    /// Compute statistics from completed plans in any order.
    pub fn compute(plans: &[CompletedPlan], today: NaiveDate, wrong_count: i64) -> Self {
        let mut sorted: Vec<&CompletedPlan> = plans.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));

        let dates: Vec<NaiveDate> = sorted.iter().map(|p| p.date).collect();

        Self {
            streak: compute_streak(&dates, today),
            weekly_count: weekly_count(&dates, today),
            total_completed: plans.len(),
            wrong_count,
            by_module: module_stats(&sorted),
        }
    }
}

/// Count consecutive days with at least one completed plan.
///
/// The walk only starts when the most recent completed day is today or
/// yesterday; otherwise the streak is broken and the result is 0.
pub fn compute_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut unique: Vec<NaiveDate> = dates.to_vec();
    unique.sort_unstable_by(|a, b| b.cmp(a));
    unique.dedup();

    let Some(&latest) = unique.first() else {
        return 0;
    };

    let yesterday = today - Duration::days(1);
    if latest != today && latest != yesterday {
        return 0;
    }

    let mut streak = 1;
    for pair in unique.windows(2) {
        if pair[0] - pair[1] == Duration::days(1) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// First day (Sunday) of the week containing `today`.
pub fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(today.weekday().num_days_from_sunday() as i64)
}

/// Completed plans dated within the current Sunday-based week.
pub fn weekly_count(dates: &[NaiveDate], today: NaiveDate) -> usize {
    let start = week_start(today);
    dates.iter().filter(|d| **d >= start).count()
}

/// Per-module score summary. `plans` must be sorted newest first.
fn module_stats(plans: &[&CompletedPlan]) -> BTreeMap<Module, ModuleStats> {
    Module::ALL
        .into_iter()
        .map(|module| {
            let scores: Vec<i32> = plans
                .iter()
                .filter(|p| p.module == module)
                .filter_map(|p| p.score)
                .collect();

            let stats = if scores.is_empty() {
                ModuleStats::default()
            } else {
                let sum: i64 = scores.iter().map(|s| *s as i64).sum();
                ModuleStats {
                    avg: (sum as f64 / scores.len() as f64).round() as i32,
                    max: scores.iter().copied().max().unwrap_or(0),
                    count: scores.len(),
                    recent5: scores.iter().take(RECENT_SCORES).copied().collect(),
                }
            };
            (module, stats)
        })
        .collect()
}
