//! Head-to-head stat comparison.
//!
//! Given two flat stat lines (player vs player, team vs team) and a list of
//! categories with their sort direction, decide per category which side
//! leads. Upstream APIs report missing stats in several ways (`"-"`, `null`,
//! absent keys, `".---"`), so every value goes through [`parse_stat`] first.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{DashError, Result};


/// Flat `stat key -> raw value` map as returned by an adapter.
pub type StatLine = BTreeMap<String, Value>;

/// Which way a category sorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Smaller is better (ERA, WHIP, turnovers).
    Asc,
    /// Larger is better (HR, points, saves).
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Direction {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            _ => Err(DashError::validation(format!(
                "unknown sort direction '{}'",
                s
            ))),
        }
    }
}

/// Which side of a comparison leads a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leader {
    Left,
    Right,
    #[serde(rename = "none")]
    Neither,
}

impl Leader {
    /// The result of the same comparison with the sides swapped.
    pub fn mirror(self) -> Self {
        match self {
            Leader::Left => Leader::Right,
            Leader::Right => Leader::Left,
            Leader::Neither => Leader::Neither,
        }
    }
}

/// A category to compare: the stat key in the line, a display label and
/// the direction in which values improve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDescriptor {
    pub key: Cow<'static, str>,
    pub label: Cow<'static, str>,
    pub direction: Direction,
}

impl CategoryDescriptor {
    pub const fn new(key: &'static str, label: &'static str, direction: Direction) -> Self {
        Self {
            key: Cow::Borrowed(key),
            label: Cow::Borrowed(label),
            direction,
        }
    }

    pub fn owned(key: impl Into<String>, label: impl Into<String>, direction: Direction) -> Self {
        Self {
            key: Cow::Owned(key.into()),
            label: Cow::Owned(label.into()),
            direction,
        }
    }
}

/// One row of a comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatComparison {
    pub key: String,
    pub value1: Value,
    pub value2: Value,
    pub leader_side: Leader,
}

/// Read a raw stat as a number.
///
/// Numbers and numeric strings (`"12"`, `".312"`, `"3.45"`) parse; `"-"`,
/// `null`, non-numeric strings, booleans, containers and non-finite values
/// are treated as absent.
pub fn parse_stat(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s == "-" {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Decide who leads one category.
///
/// Both absent or numerically equal gives [`Leader::Neither`]; exactly one
/// absent gives the side with a recorded value.
pub fn leader_for(direction: Direction, a: &Value, b: &Value) -> Leader {
    match (parse_stat(a), parse_stat(b)) {
        (None, None) => Leader::Neither,
        (Some(_), None) => Leader::Left,
        (None, Some(_)) => Leader::Right,
        (Some(x), Some(y)) => {
            if x == y {
                Leader::Neither
            } else if (x > y) == (direction == Direction::Desc) {
                Leader::Left
            } else {
                Leader::Right
            }
        }
    }
}

pub fn compare(key: &str, direction: Direction, a: &Value, b: &Value) -> StatComparison {
    StatComparison {
        key: key.to_string(),
        value1: a.clone(),
        value2: b.clone(),
        leader_side: leader_for(direction, a, b),
    }
}

/// Compare two stat lines over `categories`, in category order.
///
/// A key missing from a line is treated as `null`.
pub fn compare_stats(
    left: &StatLine,
    right: &StatLine,
    categories: &[CategoryDescriptor],
) -> Vec<StatComparison> {
    categories
        .iter()
        .map(|cat| {
            let a = left.get(cat.key.as_ref()).unwrap_or(&Value::Null);
            let b = right.get(cat.key.as_ref()).unwrap_or(&Value::Null);
            compare(&cat.key, cat.direction, a, b)
        })
        .collect()
}

/// Categories won per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub left: usize,
    pub right: usize,
    pub even: usize,
}

pub fn tally(rows: &[StatComparison]) -> Tally {
    rows.iter().fold(Tally::default(), |mut t, row| {
        match row.leader_side {
            Leader::Left => t.left += 1,
            Leader::Right => t.right += 1,
            Leader::Neither => t.even += 1,
        }
        t
    })
}
