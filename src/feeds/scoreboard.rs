//! ESPN public scoreboard adapter.
//!
//! `GET /apis/site/v2/sports/{sport}/{league}/scoreboard?dates=...`
//!
//! No API key is required. The response is large and loosely typed; only
//! the fields the dashboard shows are deserialized, everything else is
//! ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    core::{CacheKey, MemoryCache, QueryParameters, ResourceClient},
    dates::{DateRange, DateSpec},
    leagues::League,
    Result,
};

/// Default host for ESPN's site API.
pub const ESPN_SITE_BASE_URL: &str = "https://site.api.espn.com";

#[derive(Debug, Deserialize)]
struct EspnScoreboard {
    #[serde(default)]
    events: Vec<EspnEvent>,
}

#[derive(Debug, Deserialize)]
struct EspnEvent {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    competitions: Vec<EspnCompetition>,
}

#[derive(Debug, Deserialize)]
struct EspnCompetition {
    #[serde(default)]
    competitors: Vec<EspnCompetitor>,
    #[serde(default)]
    status: Option<EspnStatus>,
}

#[derive(Debug, Deserialize)]
struct EspnCompetitor {
    #[serde(default)]
    team: Option<EspnTeam>,
    #[serde(rename = "homeAway", default)]
    home_away: String,
    #[serde(default)]
    score: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EspnTeam {
    #[serde(default)]
    abbreviation: Option<String>,
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EspnStatus {
    #[serde(rename = "type", default)]
    status_type: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize)]
struct EspnStatusType {
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    state: Option<String>,
    #[serde(rename = "shortDetail", default)]
    short_detail: Option<String>,
}

/// One side of a game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamScore {
    pub abbreviation: String,
    pub display_name: String,
    /// `None` before first pitch / puck drop.
    pub score: Option<u32>,
}

/// One game on a scoreboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameScore {
    pub id: String,
    pub name: String,
    /// ESPN's short status line, e.g. `Final`, `Top 7th`, `7:00 PM EDT`.
    pub status: String,
    pub completed: bool,
    pub in_progress: bool,
    pub home: TeamScore,
    pub away: TeamScore,
}

pub fn scoreboard_path(league: League) -> String {
    format!("apis/site/v2/sports/{}/scoreboard", league.espn_path())
}

pub fn scoreboard_query(league: League, date: DateSpec) -> QueryParameters {
    QueryParameters::new().with("dates", league.scoreboard_dates(date))
}

fn team_score(c: &EspnCompetitor) -> Option<TeamScore> {
    let team = c.team.as_ref()?;
    Some(TeamScore {
        abbreviation: team.abbreviation.clone().unwrap_or_default(),
        display_name: team.display_name.clone().unwrap_or_default(),
        score: c.score.as_deref().and_then(|s| s.trim().parse().ok()),
    })
}

fn parse_event(event: EspnEvent) -> Option<GameScore> {
    let comp = event.competitions.first()?;
    let status_type = comp.status.as_ref().and_then(|s| s.status_type.as_ref());

    let side = |which: &str| {
        comp.competitors
            .iter()
            .find(|c| c.home_away == which)
            .and_then(team_score)
    };
    let home = side("home")?;
    let away = side("away")?;

    Some(GameScore {
        status: status_type
            .and_then(|t| t.short_detail.clone())
            .unwrap_or_default(),
        completed: status_type.map(|t| t.completed).unwrap_or(false),
        in_progress: status_type.and_then(|t| t.state.as_deref()) == Some("in"),
        id: event.id,
        name: event.name,
        home,
        away,
    })
}

/// Map a raw scoreboard payload into games. Events without both a home and
/// an away team are skipped.
pub fn parse_scoreboard(value: Value) -> Result<Vec<GameScore>> {
    super::expect_object(&value, "scoreboard")?;
    let board: EspnScoreboard = serde_json::from_value(value)?;
    Ok(board.events.into_iter().filter_map(parse_event).collect())
}

pub async fn fetch_scoreboard(
    client: &ResourceClient,
    league: League,
    date: DateSpec,
) -> Result<Vec<GameScore>> {
    let raw = client
        .get(&scoreboard_path(league), &scoreboard_query(league, date))
        .await?;
    parse_scoreboard(raw)
}

/// Cache key for one league's scoreboard window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreboardKey {
    pub league: League,
    pub window: DateRange,
}

impl CacheKey for ScoreboardKey {
    fn describe(&self) -> String {
        format!("scoreboard_{}_{}", self.league, self.window)
    }
}

/// Scoreboard fetcher that remembers finished windows.
///
/// A window that ended before `today` cannot change, so it is served from
/// memory after the first fetch. Today's and future windows always go to the
/// network.
#[derive(Clone)]
pub struct ScoreboardSource {
    client: ResourceClient,
    cache: MemoryCache<ScoreboardKey, Vec<GameScore>>,
}

impl ScoreboardSource {
    pub fn new(client: ResourceClient, cache_capacity: usize) -> Self {
        Self {
            client,
            cache: MemoryCache::new(cache_capacity),
        }
    }

    pub fn cache(&self) -> &MemoryCache<ScoreboardKey, Vec<GameScore>> {
        &self.cache
    }

    pub async fn fetch(
        &self,
        league: League,
        date: DateSpec,
        today: DateSpec,
    ) -> Result<Vec<GameScore>> {
        let window = league.window(date);
        if !window.is_past(today) {
            return fetch_scoreboard(&self.client, league, date).await;
        }

        let key = ScoreboardKey { league, window };
        self.cache
            .get_or_try_insert_with(key, || fetch_scoreboard(&self.client, league, date))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_board() -> Value {
        json!({
            "events": [
                {
                    "id": "401547",
                    "name": "Boston Red Sox at New York Yankees",
                    "competitions": [{
                        "competitors": [
                            {"homeAway": "home", "score": "5",
                             "team": {"abbreviation": "NYY", "displayName": "New York Yankees"}},
                            {"homeAway": "away", "score": "3",
                             "team": {"abbreviation": "BOS", "displayName": "Boston Red Sox"}}
                        ],
                        "status": {"type": {"completed": false, "state": "in", "shortDetail": "Top 7th"}}
                    }]
                },
                {
                    "id": "401548",
                    "name": "Later game",
                    "competitions": [{
                        "competitors": [
                            {"homeAway": "home", "team": {"abbreviation": "LAD"}},
                            {"homeAway": "away", "team": {"abbreviation": "SF"}}
                        ],
                        "status": {"type": {"completed": false, "state": "pre", "shortDetail": "10:10 PM EDT"}}
                    }]
                },
                {
                    "id": "broken",
                    "competitions": [{"competitors": [{"homeAway": "home", "team": {}}]}]
                }
            ]
        })
    }

    #[test]
    fn test_parse_scoreboard() {
        let games = parse_scoreboard(sample_board()).unwrap();
        assert_eq!(games.len(), 2);

        let g = &games[0];
        assert_eq!(g.id, "401547");
        assert_eq!(g.home.abbreviation, "NYY");
        assert_eq!(g.home.score, Some(5));
        assert_eq!(g.away.display_name, "Boston Red Sox");
        assert_eq!(g.status, "Top 7th");
        assert!(g.in_progress);
        assert!(!g.completed);

        let later = &games[1];
        assert_eq!(later.home.score, None);
        assert!(!later.in_progress);
        assert_eq!(later.home.display_name, "");
    }

    #[test]
    fn test_empty_board() {
        assert!(parse_scoreboard(json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_parse_error() {
        let err = parse_scoreboard(json!({"events": "nope"})).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Parse);
    }

    #[test]
    fn test_empty_body_is_unexpected_shape() {
        let err = parse_scoreboard(Value::Null).unwrap_err();
        assert!(matches!(err, crate::DashError::UnexpectedShape { .. }));
    }

    #[test]
    fn test_path_and_query() {
        assert_eq!(
            scoreboard_path(League::Nhl),
            "apis/site/v2/sports/hockey/nhl/scoreboard"
        );
        let date: DateSpec = "2025-04-01".parse().unwrap();
        assert_eq!(
            scoreboard_query(League::Nba, date).to_query_string(),
            "dates=20250401"
        );
    }
}
