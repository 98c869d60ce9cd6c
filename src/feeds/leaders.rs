//! MLB Stats API leaderboard adapter.
//!
//! `GET /api/v1/stats?stats=season&group=hitting&sortStat=homeRuns&...`
//!
//! The endpoint is sorted server-side and paged with `limit`/`offset`; it
//! reports no total count, which is why [`Paginator`](crate::poll::Paginator)
//! treats a short page as the end of the list.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::{
    core::{QueryParameters, ResourceClient},
    dates::DateRange,
    poll::PageRequest,
    stats::Direction,
    Result,
};

/// Default host for the MLB Stats API.
pub const MLB_STATS_BASE_URL: &str = "https://statsapi.mlb.com";

pub const LEADERS_PATH: &str = "api/v1/stats";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatGroup {
    Hitting,
    Pitching,
}

impl fmt::Display for StatGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatGroup::Hitting => "hitting",
            StatGroup::Pitching => "pitching",
        };
        write!(f, "{}", s)
    }
}

/// Everything that selects *which* leaderboard is shown. Changing any field
/// means a new list, so the paginator must be reset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LeaderFilter {
    pub season: u16,
    pub group: StatGroup,
    pub sort_stat: String,
    pub order: Direction,
    /// Restrict to games in this window instead of the whole season.
    pub range: Option<DateRange>,
}

impl LeaderFilter {
    pub fn new(season: u16, group: StatGroup, sort_stat: impl Into<String>) -> Self {
        Self {
            season,
            group,
            sort_stat: sort_stat.into(),
            order: Direction::Desc,
            range: None,
        }
    }

    pub fn with_order(mut self, order: Direction) -> Self {
        self.order = order;
        self
    }

    pub fn with_range(mut self, range: Option<DateRange>) -> Self {
        self.range = range;
        self
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderRow {
    pub rank: Option<u32>,
    pub player_id: Option<u64>,
    pub player_name: String,
    pub team: Option<String>,
    /// Raw value of the sort stat (may be a string such as `".312"`).
    pub value: Value,
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
    rank: Option<u32>,
    #[serde(default)]
    player: Option<NamedRef>,
    #[serde(default)]
    team: Option<NamedRef>,
    #[serde(default)]
    stat: serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    #[serde(default)]
    id: Option<u64>,
    #[serde(rename = "fullName", default)]
    full_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

pub fn leaders_query(filter: &LeaderFilter, page: PageRequest) -> QueryParameters {
    let (stats, start, end) = match filter.range {
        Some(range) => (
            "byDateRange",
            Some(range.start().to_slash()),
            Some(range.end().to_slash()),
        ),
        None => ("season", None, None),
    };

    QueryParameters::new()
        .with("stats", stats)
        .with("group", filter.group.to_string())
        .with("season", filter.season)
        .with("sortStat", filter.sort_stat.as_str())
        .with("order", filter.order.to_string())
        .with("playerPool", "ALL")
        .with_opt("startDate", start)
        .with_opt("endDate", end)
        .with("limit", page.limit)
        .with("offset", page.offset)
}

/// Map a raw `/api/v1/stats` payload into rows, keeping server order.
pub fn parse_leaders(value: Value, sort_stat: &str) -> Result<Vec<LeaderRow>> {
    super::expect_object(&value, "leaders")?;
    let env: StatsEnvelope = serde_json::from_value(value)?;
    let rows = env
        .stats
        .into_iter()
        .flat_map(|block| block.splits)
        .map(|split| {
            let player = split.player.unwrap_or(NamedRef {
                id: None,
                full_name: None,
                name: None,
            });
            LeaderRow {
                rank: split.rank,
                player_id: player.id,
                player_name: player.full_name.unwrap_or_default(),
                team: split.team.and_then(|t| t.name),
                value: split.stat.get(sort_stat).cloned().unwrap_or(Value::Null),
            }
        })
        .collect();
    Ok(rows)
}

pub async fn fetch_leaders_page(
    client: &ResourceClient,
    filter: &LeaderFilter,
    page: PageRequest,
) -> Result<Vec<LeaderRow>> {
    let raw = client.get(LEADERS_PATH, &leaders_query(filter, page)).await?;
    parse_leaders(raw, &filter.sort_stat)
}
