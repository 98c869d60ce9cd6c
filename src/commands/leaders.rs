//! Stat leaders command implementation

use crate::{
    commands::common::{current_season, display_value, print_json},
    config::Config,
    dates::{DateRange, DateSpec},
    feeds::{fetch_leaders_page, LeaderFilter, LeaderRow, StatGroup},
    poll::{PageRequest, Paginator},
    stats::Direction,
    DashError, Result,
};

#[derive(Debug, Clone)]
pub struct LeadersParams {
    pub group: StatGroup,
    pub stat: String,
    pub order: Direction,
    pub season: Option<u16>,
    pub start: Option<DateSpec>,
    pub end: Option<DateSpec>,
    pub pages: usize,
    pub limit: Option<usize>,
    pub as_json: bool,
}

/// `--start` alone runs through today; `--end` alone is an error.
pub fn resolve_range(
    start: Option<DateSpec>,
    end: Option<DateSpec>,
    today: DateSpec,
) -> Result<Option<DateRange>> {
    match (start, end) {
        (None, None) => Ok(None),
        (Some(s), Some(e)) => DateRange::new(s, e).map(Some),
        (Some(s), None) => DateRange::new(s, today).map(Some),
        (None, Some(_)) => Err(DashError::validation("--end requires --start")),
    }
}

pub fn build_filter(params: &LeadersParams, today: DateSpec) -> Result<LeaderFilter> {
    let range = resolve_range(params.start, params.end, today)?;
    Ok(LeaderFilter::new(
        params.season.unwrap_or_else(current_season),
        params.group,
        params.stat.clone(),
    )
    .with_order(params.order)
    .with_range(range))
}

fn print_rows(filter: &LeaderFilter, rows: &[LeaderRow]) {
    match filter.range {
        Some(range) => println!("{} {} leaders, {}", filter.group, filter.sort_stat, range),
        None => println!(
            "{} {} leaders, {} season",
            filter.group, filter.sort_stat, filter.season
        ),
    }
    for (i, row) in rows.iter().enumerate() {
        let rank = row.rank.map(|r| r as usize).unwrap_or(i + 1);
        println!(
            "{:>4}. {:<26} {:<24} {}",
            rank,
            row.player_name,
            row.team.as_deref().unwrap_or("-"),
            display_value(&row.value)
        );
    }
}

/// Handle the leaders command
pub async fn handle_leaders(config: &Config, params: LeadersParams) -> Result<()> {
    let filter = build_filter(&params, DateSpec::today())?;
    let limit = config.resolve_page_size(params.limit)?;
    let client = config.mlb_client()?;

    let fetch = |filter: LeaderFilter, page: PageRequest| {
        let client = client.clone();
        async move { fetch_leaders_page(&client, &filter, page).await }
    };
    let paginator = Paginator::new(filter.clone(), limit, fetch)?;

    for _ in 0..params.pages {
        paginator.load_more().await;
        let state = paginator.snapshot();
        if let Some(err) = &state.error {
            println!("⚠ Could not load page at offset {}: {}", state.offset, err);
            break;
        }
        if !state.has_more {
            break;
        }
    }

    let state = paginator.snapshot();
    if params.as_json {
        return print_json(&state);
    }
    print_rows(&filter, &state.items);
    if state.has_more {
        println!("(more available: --pages {})", params.pages + 1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> DateSpec {
        s.parse().unwrap()
    }

    fn params() -> LeadersParams {
        LeadersParams {
            group: StatGroup::Pitching,
            stat: "era".to_string(),
            order: Direction::Asc,
            season: Some(2025),
            start: None,
            end: None,
            pages: 1,
            limit: None,
            as_json: false,
        }
    }

    #[test]
    fn test_resolve_range() {
        let today = d("2025-06-15");
        assert_eq!(resolve_range(None, None, today).unwrap(), None);

        let open = resolve_range(Some(d("2025-06-01")), None, today)
            .unwrap()
            .unwrap();
        assert_eq!(open.end(), today);

        assert!(resolve_range(None, Some(today), today).is_err());
        assert!(resolve_range(Some(d("2025-07-01")), Some(d("2025-06-01")), today).is_err());
    }

    #[test]
    fn test_build_filter() {
        let mut p = params();
        p.start = Some(d("2025-05-01"));
        p.end = Some(d("2025-05-31"));

        let filter = build_filter(&p, d("2025-06-15")).unwrap();
        assert_eq!(filter.season, 2025);
        assert_eq!(filter.group, StatGroup::Pitching);
        assert_eq!(filter.sort_stat, "era");
        assert_eq!(filter.order, Direction::Asc);
        assert_eq!(filter.range.unwrap().start(), d("2025-05-01"));
    }

    #[test]
    fn test_build_filter_rejects_inverted_range() {
        let mut p = params();
        p.start = Some(d("2025-05-31"));
        p.end = Some(d("2025-05-01"));
        let err = build_filter(&p, d("2025-06-15")).unwrap_err();
        assert!(matches!(err, DashError::Validation { .. }));
    }
}
