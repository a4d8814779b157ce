use crate::error::CoreError;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};

/// Longest look-ahead accepted for upcoming-birthday queries.
pub const MAX_UPCOMING_DAYS: i64 = 365;

pub fn local_today(now_utc: i64, local_offset: FixedOffset) -> Result<NaiveDate, CoreError> {
    let now = DateTime::<Utc>::from_timestamp(now_utc, 0).ok_or(CoreError::InvalidTimestamp)?;
    Ok(now.with_timezone(&local_offset).date_naive())
}

/// Days from `today` to the next anniversary of `date`, `0` when it falls today.
///
/// A 29 February anniversary is observed on 28 February in non-leap years,
/// so the result always lies in `0..=365`.
pub fn days_until_anniversary(date: NaiveDate, today: NaiveDate) -> i64 {
    let this_year = anniversary_in(today.year(), date);
    let next = if this_year >= today {
        this_year
    } else {
        anniversary_in(today.year() + 1, date)
    };
    (next - today).num_days()
}

fn anniversary_in(year: i32, date: NaiveDate) -> NaiveDate {
    let (month, day) = match (date.month(), date.day()) {
        (2, 29) if !is_leap_year(year) => (2, 28),
        other => other,
    };
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MAX)
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
