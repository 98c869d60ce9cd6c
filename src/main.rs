//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use sports_dash::{
    cli::{Commands, Dash},
    commands::{
        compare::{handle_compare, CompareParams},
        dates::{handle_date, DateParams},
        leaders::{handle_leaders, LeadersParams},
        scores::{handle_scores, ScoresParams},
    },
    Config,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let app = Dash::parse();
    let config = Config::from_env().context("invalid environment configuration")?;

    match app.command {
        Commands::Scores {
            league,
            date,
            watch,
            interval,
            ticks,
            json,
        } => handle_scores(
            &config,
            ScoresParams {
                league,
                date,
                watch,
                interval,
                ticks,
                as_json: json,
            },
        )
        .await
        .with_context(|| format!("failed to load {} scores", league))?,

        Commands::Leaders {
            group,
            stat,
            order,
            season,
            start,
            end,
            pages,
            limit,
            json,
        } => handle_leaders(
            &config,
            LeadersParams {
                group,
                stat,
                order,
                season,
                start,
                end,
                pages,
                limit,
                as_json: json,
            },
        )
        .await
        .context("failed to load stat leaders")?,

        Commands::Compare {
            left,
            right,
            group,
            season,
            json,
        } => handle_compare(
            &config,
            CompareParams {
                left,
                right,
                group,
                season,
                as_json: json,
            },
        )
        .await
        .with_context(|| format!("failed to compare players {} and {}", left, right))?,

        Commands::Date {
            date,
            anchor,
            shift_days,
            shift_weeks,
            json,
        } => handle_date(DateParams {
            date,
            anchor,
            shift_days,
            shift_weeks,
            as_json: json,
        })?,
    }

    Ok(())
}
