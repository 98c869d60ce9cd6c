//! Head-to-head comparison command implementation

use serde_json::json;

use crate::{
    commands::common::{current_season, display_value, leader_marker, print_json},
    config::Config,
    feeds::{categories_for, fetch_player_stats, PlayerStatLine, StatGroup},
    stats::{compare_stats, tally, CategoryDescriptor, StatComparison},
    Result,
};

#[derive(Debug, Clone)]
pub struct CompareParams {
    pub left: u64,
    pub right: u64,
    pub group: StatGroup,
    pub season: Option<u16>,
    pub as_json: bool,
}

fn player_label(line: &PlayerStatLine) -> String {
    line.name
        .clone()
        .unwrap_or_else(|| format!("#{}", line.player_id))
}

fn print_table(
    left: &PlayerStatLine,
    right: &PlayerStatLine,
    categories: &[CategoryDescriptor],
    rows: &[StatComparison],
) {
    println!("{:<6} {:>12}   {:<12}", "", player_label(left), player_label(right));
    for (cat, row) in categories.iter().zip(rows) {
        println!(
            "{:<6} {:>12} {} {:<12}",
            cat.label,
            display_value(&row.value1),
            leader_marker(row.leader_side),
            display_value(&row.value2)
        );
    }
}

/// Handle the compare command
pub async fn handle_compare(config: &Config, params: CompareParams) -> Result<()> {
    let client = config.mlb_client()?;
    let season = params.season.unwrap_or_else(current_season);

    let (left, right) = tokio::try_join!(
        fetch_player_stats(&client, params.left, params.group, season),
        fetch_player_stats(&client, params.right, params.group, season),
    )?;

    let categories = categories_for(params.group);
    let rows = compare_stats(&left.stats, &right.stats, categories);
    let totals = tally(&rows);

    if params.as_json {
        return print_json(&json!({
            "season": season,
            "group": params.group,
            "left": player_label(&left),
            "right": player_label(&right),
            "rows": rows,
            "tally": totals,
        }));
    }

    print_table(&left, &right, categories, &rows);
    println!(
        "Categories led: {} {} - {} {} ({} even)",
        player_label(&left),
        totals.left,
        totals.right,
        player_label(&right),
        totals.even
    );
    Ok(())
}
