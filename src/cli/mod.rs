//! CLI argument definitions and parsing.

use chrono::Weekday;
use clap::{Parser, Subcommand};

use crate::{
    dates::{parse_weekday, DateSpec},
    feeds::StatGroup,
    leagues::League,
    stats::Direction,
};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the scoreboard for a league.
    ///
    /// Without `--watch` the board is fetched once. With `--watch` it is
    /// polled on a fixed interval; if no `--date` is given the board follows
    /// today's date across midnight.
    Scores {
        /// League to show.
        #[clap(long, short, value_enum)]
        league: League,

        /// Day to show (YYYY-MM-DD). Defaults to today. NFL shows the
        /// Thursday-to-Wednesday week containing this day.
        #[clap(long, short)]
        date: Option<DateSpec>,

        /// Keep polling and print every update.
        #[clap(long, short)]
        watch: bool,

        /// Poll interval in seconds (or set `SPORTS_DASH_POLL_SECS`).
        #[clap(long, short)]
        interval: Option<u64>,

        /// Stop after this many updates when watching.
        #[clap(long)]
        ticks: Option<usize>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Page through MLB stat leaders.
    Leaders {
        /// Stat group.
        #[clap(long, short, value_enum, default_value_t = StatGroup::Hitting)]
        group: StatGroup,

        /// Stat to sort by, as named by the MLB Stats API (e.g. homeRuns, era).
        #[clap(long, short)]
        stat: String,

        /// Sort order; use `asc` for stats where lower is better.
        #[clap(long, short, value_enum, default_value_t = Direction::Desc)]
        order: Direction,

        /// Season year. Defaults to the current year.
        #[clap(long)]
        season: Option<u16>,

        /// Only count games on or after this day (YYYY-MM-DD).
        #[clap(long)]
        start: Option<DateSpec>,

        /// Only count games on or before this day. Requires `--start`.
        #[clap(long)]
        end: Option<DateSpec>,

        /// Number of pages to load.
        #[clap(long, default_value_t = 1)]
        pages: usize,

        /// Rows per page (or set `SPORTS_DASH_PAGE_SIZE`).
        #[clap(long)]
        limit: Option<usize>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Compare two MLB players' season lines category by category.
    Compare {
        /// MLB person id of the left-hand player.
        left: u64,

        /// MLB person id of the right-hand player.
        right: u64,

        /// Stat group.
        #[clap(long, short, value_enum, default_value_t = StatGroup::Hitting)]
        group: StatGroup,

        /// Season year. Defaults to the current year.
        #[clap(long)]
        season: Option<u16>,

        /// Output results as JSON instead of a table.
        #[clap(long)]
        json: bool,
    },

    /// Print the request forms of a date.
    Date {
        /// Day to convert (YYYY-MM-DD). Defaults to today.
        date: Option<DateSpec>,

        /// Also print the start of the week beginning on this weekday (e.g. thu).
        #[clap(long, short, value_parser = parse_weekday)]
        anchor: Option<Weekday>,

        /// Shift the date by this many days first.
        #[clap(long, default_value_t = 0, allow_hyphen_values = true)]
        shift_days: i64,

        /// Shift the date by this many weeks first.
        #[clap(long, default_value_t = 0, allow_hyphen_values = true)]
        shift_weeks: i64,

        /// Output results as JSON.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "sports-dash",
    about = "Scores, stat leaders and head-to-head comparisons from public sports APIs"
)]
pub struct Dash {
    #[clap(subcommand)]
    pub command: Commands,
}
