//! Score aggregation for item-graded modules.

use serde::{Deserialize, Serialize};

use crate::schema::ItemGrading;
use crate::types::Module;

/// Letter grade for a 0-100 score.
pub fn letter_grade(score: i32) -> &'static str {
    match score {
        s if s >= 90 => "A",
        s if s >= 75 => "B",
        s if s >= 60 => "C",
        _ => "D",
    }
}

/// Round a score the way it is stored.
pub fn round_score(score: f64) -> i32 {
    score.round() as i32
}

/// One graded answer, tagged with the question it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedItem {
    pub question_id: u32,
    #[serde(flatten)]
    pub grading: ItemGrading,
}

/// Feedback stored for an item-graded submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub total_score: i32,
    pub grade: String,
    pub results: Vec<GradedItem>,
    pub summary: String,
}

impl ItemSummary {
    /// Average the item scores and attach the module's encouragement text.
    ///
    /// An empty result list scores 0.
    pub fn aggregate(module: Module, results: Vec<GradedItem>) -> Self {
        let total_score = if results.is_empty() {
            0
        } else {
            let sum: f64 = results.iter().map(|r| r.grading.score).sum();
            round_score(sum / results.len() as f64)
        };

        Self {
            total_score,
            grade: letter_grade(total_score).to_string(),
            summary: summary_for(module, total_score).to_string(),
            results,
        }
    }

    /// Items answered incorrectly.
    pub fn incorrect(&self) -> impl Iterator<Item = &GradedItem> {
        self.results.iter().filter(|r| !r.grading.is_correct)
    }
}

fn summary_for(module: Module, score: i32) -> &'static str {
    match module {
        Module::EnglishReading => match score {
            s if s >= 80 => "Great job on reading comprehension! Keep it up! 阅读理解做得很好，继续加油！",
            s if s >= 60 => "Not bad! Review the passage carefully for clues. 不错，注意从原文中寻找线索。",
            _ => "Keep practicing! Re-read the passage slowly. 继续努力，尝试慢慢精读文章。",
        },
        _ => match score {
            s if s >= 80 => "古文理解能力不错！继续保持！",
            s if s >= 60 => "答题基本正确，部分地方需要再仔细理解原文。",
            _ => "建议多读几遍原文，注意重点字词的含义。",
        },
    }
}
