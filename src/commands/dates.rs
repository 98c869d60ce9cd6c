//! Date conversion command implementation

use chrono::Weekday;
use serde::Serialize;

use crate::{commands::common::print_json, dates::DateSpec, Result};

#[derive(Debug, Clone)]
pub struct DateParams {
    pub date: Option<DateSpec>,
    pub anchor: Option<Weekday>,
    pub shift_days: i64,
    pub shift_weeks: i64,
    pub as_json: bool,
}

/// Every request form of one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateForms {
    pub date: DateSpec,
    pub compact: String,
    pub slash: String,
    pub weekday: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_start: Option<DateSpec>,
}

/// Apply the day shift, then the week shift, and derive the display forms.
pub fn date_forms(
    date: DateSpec,
    anchor: Option<Weekday>,
    shift_days: i64,
    shift_weeks: i64,
) -> Result<DateForms> {
    let date = date.shift_days(shift_days)?.shift_weeks(shift_weeks)?;
    Ok(DateForms {
        date,
        compact: date.to_compact(),
        slash: date.to_slash(),
        weekday: date.weekday().to_string(),
        week_start: anchor.map(|a| date.week_start(a)),
    })
}

/// Handle the date command
pub fn handle_date(params: DateParams) -> Result<()> {
    let forms = date_forms(
        params.date.unwrap_or_else(DateSpec::today),
        params.anchor,
        params.shift_days,
        params.shift_weeks,
    )?;

    if params.as_json {
        return print_json(&forms);
    }

    println!("date:       {}", forms.date);
    println!("compact:    {}", forms.compact);
    println!("slash:      {}", forms.slash);
    println!("weekday:    {}", forms.weekday);
    if let (Some(anchor), Some(start)) = (params.anchor, forms.week_start) {
        println!("week start: {} ({})", start, anchor);
    }
    Ok(())
}
