use super::*;

fn d(s: &str) -> DateSpec {
    s.parse().unwrap()
}

#[test]
fn test_compact_and_slash_forms() {
    let date = d("2025-04-01");
    assert_eq!(date.to_compact(), "20250401");
    assert_eq!(date.to_slash(), "04/01/2025");
    assert_eq!(date.to_string(), "2025-04-01");
}

#[test]
fn test_strict_parse_rejects_other_shapes() {
    for bad in ["2025-4-1", "04/01/2025", "20250401", "2025-02-30", "", "abcd-ef-gh"] {
        match bad.parse::<DateSpec>() {
            Err(DashError::InvalidDate { input }) => assert_eq!(input, bad),
            other => panic!("expected InvalidDate for {:?}, got {:?}", bad, other),
        }
    }
}

#[test]
fn test_week_start_wraps_year_boundary() {
    assert_eq!(d("2025-01-01").week_start(Weekday::Thu), d("2024-12-26"));
}

#[test]
fn test_week_start_on_anchor_day_is_identity() {
    // 2025-09-04 is a Thursday
    assert_eq!(d("2025-09-04").week_start(Weekday::Thu), d("2025-09-04"));
    assert_eq!(d("2025-09-10").week_start(Weekday::Thu), d("2025-09-04"));
}

#[test]
fn test_week_start_month_rollover() {
    // 2025-03-02 is a Sunday
    assert_eq!(d("2025-03-02").week_start(Weekday::Mon), d("2025-02-24"));
    assert_eq!(d("2024-03-01").week_start(Weekday::Thu), d("2024-02-29"));
}

#[test]
fn test_shift_days_and_weeks() {
    assert_eq!(d("2024-12-31").shift_days(1).unwrap(), d("2025-01-01"));
    assert_eq!(d("2025-03-01").shift_days(-1).unwrap(), d("2025-02-28"));
    assert_eq!(d("2025-01-02").shift_weeks(-1).unwrap(), d("2024-12-26"));
    assert_eq!(d("2025-01-02").shift_weeks(0).unwrap(), d("2025-01-02"));
}

#[test]
fn test_shift_out_of_range() {
    let err = d("2025-01-01").shift_days(i64::MAX).unwrap_err();
    assert!(matches!(err, DashError::Validation { .. }));
    assert!(d("2025-01-01").shift_weeks(i64::MAX).is_err());
}

#[test]
fn test_from_ymd() {
    assert_eq!(DateSpec::from_ymd(2025, 4, 1).unwrap(), d("2025-04-01"));
    assert!(DateSpec::from_ymd(2025, 13, 1).is_err());
}

#[test]
fn test_date_range_validation() {
    let range = DateRange::new(d("2025-04-01"), d("2025-04-30")).unwrap();
    assert!(range.contains(d("2025-04-15")));
    assert!(!range.contains(d("2025-05-01")));
    assert_eq!(range.to_string(), "2025-04-01..2025-04-30");

    let err = DateRange::new(d("2025-05-01"), d("2025-04-01")).unwrap_err();
    assert!(err.to_string().contains("after end date"));

    // single-day range is fine
    assert!(DateRange::new(d("2025-04-01"), d("2025-04-01")).is_ok());
}

#[test]
fn test_week_of_and_is_past() {
    let week = DateRange::week_of(d("2025-01-01"), Weekday::Thu);
    assert_eq!(week.start(), d("2024-12-26"));
    assert_eq!(week.end(), d("2025-01-01"));

    assert!(week.is_past(d("2025-01-02")));
    assert!(!week.is_past(d("2025-01-01")));
}

#[test]
fn test_serde_uses_canonical_form() {
    let json = serde_json::to_string(&d("2025-04-01")).unwrap();
    assert_eq!(json, "\"2025-04-01\"");

    let back: DateSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(back, d("2025-04-01"));
    assert!(serde_json::from_str::<DateSpec>("\"04/01/2025\"").is_err());
}

#[test]
fn test_parse_weekday() {
    assert_eq!(parse_weekday("thu").unwrap(), Weekday::Thu);
    assert_eq!(parse_weekday("Thursday").unwrap(), Weekday::Thu);
    assert!(parse_weekday("someday").is_err());
}
