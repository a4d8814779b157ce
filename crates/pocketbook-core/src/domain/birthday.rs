use crate::domain::field::Field;
use crate::error::CoreError;
use crate::rules::dates::days_until_anniversary;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";

// chrono's `%Y` takes any width and a sign, so the shape is checked first.
static BIRTHDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,2}\.[0-9]{1,2}\.[0-9]{4}$")
        .unwrap_or_else(|err| panic!("birthday pattern is valid: {err}"))
});

/// Birthday kept as `DD.MM.YYYY` text alongside the date it denotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday {
    text: String,
    date: NaiveDate,
}

impl Birthday {
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let date = parse_birthday(raw)?;
        Ok(Self::from_date(date))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            text: date.format(BIRTHDAY_FORMAT).to_string(),
            date,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn days_until(&self, today: NaiveDate) -> i64 {
        days_until_anniversary(self.date, today)
    }
}

pub fn parse_birthday(raw: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = raw.trim();
    if !BIRTHDAY_RE.is_match(trimmed) {
        return Err(CoreError::InvalidBirthday(trimmed.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, BIRTHDAY_FORMAT)
        .map_err(|_| CoreError::InvalidBirthday(trimmed.to_string()))
}

impl Field for Birthday {
    fn parse(raw: &str) -> Result<Self, CoreError> {
        Self::new(raw)
    }

    fn value(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Birthday {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Birthday {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Birthday> for String {
    fn from(value: Birthday) -> Self {
        value.text
    }
}
