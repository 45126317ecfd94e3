//! Weekday module rotation for the daily plan.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::types::Module;

/// Module assigned to a given weekday.
pub fn module_for_weekday(weekday: Weekday) -> Module {
    match weekday {
        Weekday::Sun | Weekday::Mon | Weekday::Fri => Module::ChineseWriting,
        Weekday::Tue | Weekday::Sat => Module::ClassicalReading,
        Weekday::Wed => Module::EnglishWriting,
        Weekday::Thu => Module::EnglishReading,
    }
}

/// Module scheduled on a calendar date.
pub fn module_for_date(date: NaiveDate) -> Module {
    module_for_weekday(date.weekday())
}
