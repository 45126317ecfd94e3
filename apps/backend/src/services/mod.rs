pub mod ai;
pub mod content;
pub mod grading;
pub mod seed;

use chrono::NaiveDate;

/// Calendar date used for daily plans, in server local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
