//! Supported leagues and how each one addresses a day on ESPN.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dates::{DateRange, DateSpec};
use crate::error::{DashError, Result};

/// Leagues shown on the dashboard.
///
/// # Examples
///
/// ```rust
/// use sports_dash::{DateSpec, League};
///
/// let day: DateSpec = "2025-01-01".parse().unwrap();
/// assert_eq!(League::Nba.scoreboard_dates(day), "20250101");
/// // NFL weeks run Thursday to Wednesday
/// assert_eq!(League::Nfl.scoreboard_dates(day), "20241226-20250101");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum League {
    Mlb,
    Nfl,
    Nba,
    Nhl,
}

impl League {
    pub const ALL: [League; 4] = [League::Mlb, League::Nfl, League::Nba, League::Nhl];

    /// `{sport}/{league}` segment of ESPN site API paths.
    pub fn espn_path(&self) -> &'static str {
        match self {
            League::Mlb => "baseball/mlb",
            League::Nfl => "football/nfl",
            League::Nba => "basketball/nba",
            League::Nhl => "hockey/nhl",
        }
    }

    /// Leagues whose schedule is browsed by week rather than by day.
    pub fn week_anchor(&self) -> Option<Weekday> {
        match self {
            League::Nfl => Some(Weekday::Thu),
            _ => None,
        }
    }

    /// Window of days one scoreboard covers for `date`.
    pub fn window(&self, date: DateSpec) -> DateRange {
        match self.week_anchor() {
            Some(anchor) => DateRange::week_of(date, anchor),
            None => DateRange::single(date),
        }
    }

    /// Value for ESPN's `dates` parameter.
    pub fn scoreboard_dates(&self, date: DateSpec) -> String {
        let window = self.window(date);
        if window.start() == window.end() {
            window.start().to_compact()
        } else {
            format!("{}-{}", window.start().to_compact(), window.end().to_compact())
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            League::Mlb => "MLB",
            League::Nfl => "NFL",
            League::Nba => "NBA",
            League::Nhl => "NHL",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for League {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mlb" => Ok(League::Mlb),
            "nfl" => Ok(League::Nfl),
            "nba" => Ok(League::Nba),
            "nhl" => Ok(League::Nhl),
            _ => Err(DashError::validation(format!("unknown league '{}'", s))),
        }
    }
}
