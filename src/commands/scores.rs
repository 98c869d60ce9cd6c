//! Scoreboard command implementation

use tracing::info;

use crate::{
    commands::common::{format_game, print_json},
    config::Config,
    dates::DateSpec,
    feeds::{GameScore, ScoreboardSource},
    leagues::League,
    poll::{KeyedSubscription, PollingState},
    Result,
};

/// Finished windows kept in memory while watching.
const SCOREBOARD_CACHE_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct ScoresParams {
    pub league: League,
    pub date: Option<DateSpec>,
    pub watch: bool,
    pub interval: Option<u64>,
    pub ticks: Option<usize>,
    pub as_json: bool,
}

fn print_board(league: League, date: DateSpec, games: &[GameScore]) {
    println!(
        "{} {} ({} game{})",
        league,
        league.window(date),
        games.len(),
        if games.len() == 1 { "" } else { "s" }
    );
    for game in games {
        println!("  {}", format_game(game));
    }
}

fn print_state(
    league: League,
    date: DateSpec,
    state: &PollingState<Vec<GameScore>>,
    as_json: bool,
) -> Result<()> {
    if as_json {
        return print_json(state);
    }
    if let Some(games) = &state.data {
        print_board(league, date, games);
    }
    if let Some(err) = &state.error {
        println!("⚠ refresh failed, showing last good data: {}", err);
    }
    Ok(())
}

/// Handle the scores command
pub async fn handle_scores(config: &Config, params: ScoresParams) -> Result<()> {
    let source = ScoreboardSource::new(config.espn_client()?, SCOREBOARD_CACHE_CAPACITY);
    let league = params.league;

    if !params.watch {
        let today = DateSpec::today();
        let date = params.date.unwrap_or(today);
        let games = source.fetch(league, date, today).await?;
        if params.as_json {
            return print_json(&games);
        }
        print_board(league, date, &games);
        return Ok(());
    }

    let interval = config.resolve_poll_interval(params.interval)?;
    let follow_today = params.date.is_none();
    let start_date = params.date.unwrap_or_else(DateSpec::today);

    let mut sub = KeyedSubscription::start(start_date, interval, move |date: DateSpec| {
        let source = source.clone();
        async move { source.fetch(league, date, DateSpec::today()).await }
    })?;
    info!(%league, date = %start_date, "watching scoreboard");

    let mut rx = sub.watch();
    let mut last_shown = None;
    let mut updates = 0usize;
    loop {
        let changed = tokio::select! {
            changed = rx.changed() => changed.is_ok(),
            _ = tokio::signal::ctrl_c() => false,
        };
        if !changed {
            break;
        }

        if follow_today && sub.update(DateSpec::today())? {
            info!(date = %sub.params(), "date rolled over, restarting scoreboard");
            rx = sub.watch();
            last_shown = None;
            continue;
        }

        let state = rx.borrow_and_update().clone();
        let shown = (state.data.clone(), state.error.clone());
        if shown == (None, None) || last_shown.as_ref() == Some(&shown) {
            continue;
        }
        print_state(league, *sub.params(), &state, params.as_json)?;
        last_shown = Some(shown);

        updates += 1;
        if params.ticks.is_some_and(|max| updates >= max) {
            break;
        }
    }

    sub.stop();
    Ok(())
}
