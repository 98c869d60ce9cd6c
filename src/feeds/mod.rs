//! Per-endpoint adapters
//!
//! Each adapter owns the request shape for one upstream endpoint and maps
//! its loosely-typed JSON into the typed items the dashboard works with, so
//! upstream schema drift stays contained here:
//! - `scoreboard`: ESPN site API scoreboards (all leagues)
//! - `leaders`: MLB Stats API leaderboards (paged)
//! - `player_stats`: MLB Stats API per-player season lines

pub mod leaders;
pub mod player_stats;
pub mod scoreboard;

pub use leaders::{fetch_leaders_page, LeaderFilter, LeaderRow, StatGroup, MLB_STATS_BASE_URL};
pub use player_stats::{categories_for, fetch_player_stats, PlayerStatLine};
pub use scoreboard::{fetch_scoreboard, GameScore, ScoreboardSource, TeamScore, ESPN_SITE_BASE_URL};

use serde_json::Value;

use crate::{DashError, Result};

/// Every endpoint answers with a JSON object; anything else (including the
/// `Null` of an empty body) is an upstream schema change.
fn expect_object(value: &Value, endpoint: &str) -> Result<()> {
    if value.is_object() {
        Ok(())
    } else {
        Err(DashError::shape(format!(
            "{} response is not a JSON object",
            endpoint
        )))
    }
}
