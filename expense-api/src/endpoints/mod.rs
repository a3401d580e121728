pub mod expenses;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Key the database assigns to a pushed expense (e.g. `-NaBcD3fGh1jK`)
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ExpenseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ExpenseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for ExpenseId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ExpenseId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Wire format for expense dates.
///
/// Dates are written as `YYYY-MM-DD`. Older clients stored full ISO-8601
/// timestamps (`2023-06-01T00:00:00.000Z`), so reading accepts either and
/// keeps the calendar date of the timestamp.
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_iso_date(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid date '{}': expected ISO-8601", s))
        })
    }
}

/// Parse an ISO-8601 date or timestamp into its calendar date
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, iso_date::FORMAT) {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(s)
        .map(|timestamp| timestamp.date_naive())
        .ok()
}
