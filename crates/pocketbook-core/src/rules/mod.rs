pub mod dates;

pub use dates::{days_until_anniversary, is_leap_year, local_today, MAX_UPCOMING_DAYS};
