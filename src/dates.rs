//! Calendar date normalization for request parameters.
//!
//! Every upstream API wants a slightly different spelling of the same day:
//! ESPN scoreboards take `YYYYMMDD`, the MLB stats API takes `MM/DD/YYYY`,
//! and football weeks are addressed by the Thursday they start on. A
//! [`DateSpec`] holds the one canonical calendar day and derives the other
//! forms on demand so they can never drift apart.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{DashError, Result};

#[cfg(test)]
mod tests;

const CANONICAL: &str = "%Y-%m-%d";

/// A calendar day (no time zone), canonically `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateSpec(NaiveDate);

impl DateSpec {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| DashError::InvalidDate {
                input: format!("{:04}-{:02}-{:02}", year, month, day),
            })
    }

    /// The current day on the local calendar.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// `YYYYMMDD`
    pub fn to_compact(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }

    /// `MM/DD/YYYY`
    pub fn to_slash(&self) -> String {
        self.0.format("%m/%d/%Y").to_string()
    }

    /// Most recent `anchor` on or before this day.
    pub fn week_start(&self, anchor: Weekday) -> Self {
        let back = (self.0.weekday().num_days_from_monday() + 7
            - anchor.num_days_from_monday())
            % 7;
        Self(self.0 - Duration::days(i64::from(back)))
    }

    pub fn shift_days(&self, delta: i64) -> Result<Self> {
        Duration::try_days(delta)
            .and_then(|d| self.0.checked_add_signed(d))
            .map(Self)
            .ok_or_else(|| {
                DashError::validation(format!(
                    "{} shifted by {} days is out of range",
                    self, delta
                ))
            })
    }

    pub fn shift_weeks(&self, delta: i64) -> Result<Self> {
        let days = delta
            .checked_mul(7)
            .ok_or_else(|| DashError::validation(format!("{} weeks is out of range", delta)))?;
        self.shift_days(days)
    }
}

impl fmt::Display for DateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL))
    }
}

impl FromStr for DateSpec {
    type Err = DashError;

    /// Strict `YYYY-MM-DD`; chrono alone would also accept `2025-4-1`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || DashError::InvalidDate {
            input: s.to_string(),
        };
        let b = s.as_bytes();
        let shape_ok = b.len() == 10
            && b[4] == b'-'
            && b[7] == b'-'
            && b.iter()
                .enumerate()
                .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
        if !shape_ok {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(s, CANONICAL)
            .map(Self)
            .map_err(|_| invalid())
    }
}

impl From<NaiveDate> for DateSpec {
    fn from(d: NaiveDate) -> Self {
        Self(d)
    }
}

impl Serialize for DateSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Inclusive `start..=end` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: DateSpec,
    end: DateSpec,
}

impl DateRange {
    /// Fails with a validation error when `start` is after `end`.
    pub fn new(start: DateSpec, end: DateSpec) -> Result<Self> {
        if start > end {
            return Err(DashError::validation(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn single(date: DateSpec) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// The seven-day week containing `date`, starting on `anchor`.
    pub fn week_of(date: DateSpec, anchor: Weekday) -> Self {
        let start = date.week_start(anchor);
        Self {
            start,
            end: Self::clamped_add(start, 6),
        }
    }

    fn clamped_add(date: DateSpec, days: i64) -> DateSpec {
        date.shift_days(days).unwrap_or(date)
    }

    pub fn start(&self) -> DateSpec {
        self.start
    }

    pub fn end(&self) -> DateSpec {
        self.end
    }

    pub fn contains(&self, date: DateSpec) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether the whole window lies strictly before `today`.
    pub fn is_past(&self, today: DateSpec) -> bool {
        self.end < today
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Parse a weekday name or abbreviation (`thu`, `Thursday`).
pub fn parse_weekday(s: &str) -> Result<Weekday> {
    s.parse::<Weekday>()
        .map_err(|_| DashError::validation(format!("unknown weekday '{}'", s)))
}
