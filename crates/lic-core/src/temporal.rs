//! # Calendar Helpers
//!
//! License lifecycles are tracked in whole calendar days. Every
//! classification in the workspace takes "today" as an explicit argument;
//! [`utc_today`] is the one place the wall clock is read.

use chrono::{NaiveDate, Utc};

/// Today's date in UTC.
pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Signed number of days from `today` until `end`.
///
/// Negative once `end` has passed, zero on the end date itself.
pub fn days_remaining(end: NaiveDate, today: NaiveDate) -> i64 {
    (end - today).num_days()
}
