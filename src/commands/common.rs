//! Common utilities and helper functions shared across commands.

use chrono::Datelike;
use serde::Serialize;
use serde_json::Value;

use crate::{dates::DateSpec, feeds::GameScore, stats::Leader, Result};

/// Season year to use when none is given.
pub fn current_season() -> u16 {
    u16::try_from(DateSpec::today().as_naive().year()).unwrap_or(u16::MAX)
}

/// Render a raw stat value for a text table. Absent values show as `-`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn leader_marker(leader: Leader) -> &'static str {
    match leader {
        Leader::Left => "<",
        Leader::Right => ">",
        Leader::Neither => "=",
    }
}

/// One line per game: `BOS   3 @ NYY   5  Top 7th`.
pub fn format_game(game: &GameScore) -> String {
    let score = |s: Option<u32>| s.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
    format!(
        "{:>4} {:>3} @ {:<4} {:>3}  {}",
        game.away.abbreviation,
        score(game.away.score),
        game.home.abbreviation,
        score(game.home.score),
        game.status
    )
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
