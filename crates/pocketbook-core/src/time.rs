use crate::rules::dates;
use chrono::{FixedOffset, Local, NaiveDate, Offset, Utc};

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn local_offset() -> FixedOffset {
    Local::now().offset().fix()
}

/// Today's date on the local wall clock.
pub fn today() -> NaiveDate {
    dates::local_today(now_utc(), local_offset()).unwrap_or_else(|_| Local::now().date_naive())
}
