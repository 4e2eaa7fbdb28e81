use super::*;
use chrono::TimeZone;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn age_on(birth: &str, on: &str) -> Result<AgeResponse, ToolError> {
    age(AgeRequest { birth_date: birth.into(), on_date: Some(on.into()) }, date(2000, 1, 1))
}

#[test]
fn age_in_years_months_days() {
    let out = age_on("1990-05-15", "2024-03-10").unwrap();
    assert_eq!((out.years, out.months, out.days), (33, 9, 24));
    assert_eq!(out.born_on, "Tuesday");
    assert_eq!(out.next_birthday, "2024-05-15");
    assert_eq!(out.days_until_birthday, 66);
}

#[test]
fn age_on_birthday_is_whole_years() {
    let out = age_on("2000-02-10", "2025-02-10").unwrap();
    assert_eq!((out.years, out.months, out.days), (25, 0, 0));
    assert_eq!(out.days_until_birthday, 0);
    assert_eq!(out.total_days, 9132);
    assert_eq!(out.total_weeks, 1304);
}

#[test]
fn leap_day_birthday_falls_back_to_feb_28() {
    let out = age_on("2004-02-29", "2025-01-01").unwrap();
    assert_eq!(out.next_birthday, "2025-02-28");
}

#[test]
fn leap_day_birthday_is_whole_years_on_feb_28() {
    let out = age_on("2004-02-29", "2025-02-28").unwrap();
    assert_eq!((out.years, out.months, out.days), (21, 0, 0));
    assert_eq!(out.next_birthday, "2025-02-28");
    assert_eq!(out.days_until_birthday, 0);

    let out = age_on("2004-02-29", "2024-02-29").unwrap();
    assert_eq!((out.years, out.months, out.days), (20, 0, 0));
}

#[test]
fn month_end_birthday_past_a_short_month() {
    let out = age_on("2000-01-31", "2023-03-01").unwrap();
    assert_eq!((out.years, out.months, out.days), (23, 1, 1));
    assert_eq!(out.next_birthday, "2024-01-31");

    let out = age_on("2000-03-31", "2000-05-01").unwrap();
    assert_eq!((out.years, out.months, out.days), (0, 1, 1));
}

#[test]
fn age_defaults_to_today() {
    let out = age(AgeRequest { birth_date: "1999-01-01".into(), on_date: None }, date(2000, 1, 1)).unwrap();
    assert_eq!(out.years, 1);
}

#[test]
fn age_rejects_future_birth_and_bad_format() {
    assert!(matches!(
        age_on("2030-01-01", "2024-01-01"),
        Err(ToolError::InvalidInput { field: "birth_date", .. })
    ));
    assert!(matches!(
        age_on("01/02/2000", "2024-01-01"),
        Err(ToolError::InvalidInput { field: "birth_date", .. })
    ));
}

#[test]
fn countdown_breaks_down_remaining_time() {
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let out = countdown(CountdownRequest { until: "2025-01-02T01:02:03Z".into() }, now).unwrap();
    assert_eq!((out.days, out.hours, out.minutes, out.seconds), (1, 1, 2, 3));
    assert_eq!(out.total_seconds, 90_123);
    assert!(!out.done);
}

#[test]
fn countdown_clamps_past_instants() {
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let out = countdown(CountdownRequest { until: "2024-12-31T00:00:00+02:00".into() }, now).unwrap();
    assert!(out.done);
    assert_eq!(out.total_seconds, 0);
}

#[test]
fn countdown_rejects_non_rfc3339() {
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    assert!(countdown(CountdownRequest { until: "tomorrow".into() }, now).is_err());
}
