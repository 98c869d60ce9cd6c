//! MLB Stats API per-player season lines, for head-to-head comparison.
//!
//! `GET /api/v1/people/{id}/stats?stats=season&group=hitting&season=2025`

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    core::{QueryParameters, ResourceClient},
    feeds::leaders::StatGroup,
    stats::{CategoryDescriptor, Direction, StatLine},
    Result,
};

/// Categories shown when comparing two hitters.
pub const HITTING_CATEGORIES: &[CategoryDescriptor] = &[
    CategoryDescriptor::new("avg", "AVG", Direction::Desc),
    CategoryDescriptor::new("obp", "OBP", Direction::Desc),
    CategoryDescriptor::new("slg", "SLG", Direction::Desc),
    CategoryDescriptor::new("ops", "OPS", Direction::Desc),
    CategoryDescriptor::new("homeRuns", "HR", Direction::Desc),
    CategoryDescriptor::new("rbi", "RBI", Direction::Desc),
    CategoryDescriptor::new("runs", "R", Direction::Desc),
    CategoryDescriptor::new("hits", "H", Direction::Desc),
    CategoryDescriptor::new("stolenBases", "SB", Direction::Desc),
    CategoryDescriptor::new("strikeOuts", "SO", Direction::Asc),
];

/// Categories shown when comparing two pitchers.
pub const PITCHING_CATEGORIES: &[CategoryDescriptor] = &[
    CategoryDescriptor::new("era", "ERA", Direction::Asc),
    CategoryDescriptor::new("whip", "WHIP", Direction::Asc),
    CategoryDescriptor::new("wins", "W", Direction::Desc),
    CategoryDescriptor::new("losses", "L", Direction::Asc),
    CategoryDescriptor::new("saves", "SV", Direction::Desc),
    CategoryDescriptor::new("strikeOuts", "SO", Direction::Desc),
    CategoryDescriptor::new("baseOnBalls", "BB", Direction::Asc),
    CategoryDescriptor::new("inningsPitched", "IP", Direction::Desc),
];

pub fn categories_for(group: StatGroup) -> &'static [CategoryDescriptor] {
    match group {
        StatGroup::Hitting => HITTING_CATEGORIES,
        StatGroup::Pitching => PITCHING_CATEGORIES,
    }
}

/// A player's flattened stat line for one season and group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStatLine {
    pub player_id: u64,
    pub name: Option<String>,
    /// Empty when the player has no recorded stats for the season.
    pub stats: StatLine,
}

#[derive(Debug, Deserialize)]
struct StatsEnvelope {
    #[serde(default)]
    stats: Vec<StatsBlock>,
}

#[derive(Debug, Deserialize)]
struct StatsBlock {
    #[serde(default)]
    splits: Vec<Split>,
}

#[derive(Debug, Deserialize)]
struct Split {
    #[serde(default)]
    player: Option<PlayerRef>,
    #[serde(default)]
    stat: StatLine,
}

#[derive(Debug, Deserialize)]
struct PlayerRef {
    #[serde(rename = "fullName", default)]
    full_name: Option<String>,
}

pub fn player_stats_path(player_id: u64) -> String {
    format!("api/v1/people/{}/stats", player_id)
}

pub fn player_stats_query(group: StatGroup, season: u16) -> QueryParameters {
    QueryParameters::new()
        .with("stats", "season")
        .with("group", group.to_string())
        .with("season", season)
}

/// Take the first split's `stat` object. Players traded mid-season can have
/// one split per team; the first one is the season total.
pub fn parse_player_stats(player_id: u64, value: Value) -> Result<PlayerStatLine> {
    super::expect_object(&value, "player stats")?;
    let env: StatsEnvelope = serde_json::from_value(value)?;
    let split = env
        .stats
        .into_iter()
        .flat_map(|block| block.splits)
        .next();

    let (name, stats) = match split {
        Some(s) => (s.player.and_then(|p| p.full_name), s.stat),
        None => (None, StatLine::new()),
    };

    Ok(PlayerStatLine {
        player_id,
        name,
        stats,
    })
}

pub async fn fetch_player_stats(
    client: &ResourceClient,
    player_id: u64,
    group: StatGroup,
    season: u16,
) -> Result<PlayerStatLine> {
    let raw = client
        .get(
            &player_stats_path(player_id),
            &player_stats_query(group, season),
        )
        .await?;
    parse_player_stats(player_id, raw)
}
