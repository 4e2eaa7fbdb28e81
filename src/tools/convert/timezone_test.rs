use chrono::TimeZone;

use super::*;

fn req(datetime: &str, from: &str, to: &str) -> TimezoneRequest {
    TimezoneRequest { datetime: datetime.into(), from: from.into(), to: to.into() }
}

#[test]
fn converts_between_zones_in_winter() {
    let out = convert(req("2025-01-15T09:30", "America/New_York", "Asia/Tokyo")).unwrap();
    assert_eq!(out.from.utc_offset, "-05:00");
    assert_eq!(out.to.datetime, "2025-01-15T23:30:00");
    assert_eq!(out.to.utc_offset, "+09:00");
    assert_eq!(out.utc, "2025-01-15T14:30:00Z");
    assert!((out.hour_difference - 14.0).abs() < f64::EPSILON);
}

#[test]
fn honours_daylight_saving() {
    let out = convert(req("2025-07-01 12:00", "Europe/London", "UTC")).unwrap();
    assert_eq!(out.from.utc_offset, "+01:00");
    assert_eq!(out.from.abbreviation, "BST");
    assert_eq!(out.to.datetime, "2025-07-01T11:00:00");
}

#[test]
fn half_hour_offsets() {
    let out = convert(req("2025-03-01T00:00:00", "UTC", "Asia/Kolkata")).unwrap();
    assert_eq!(out.to.datetime, "2025-03-01T05:30:00");
    assert!((out.hour_difference - 5.5).abs() < f64::EPSILON);
}

#[test]
fn ambiguous_time_resolves_to_earlier_instant() {
    // 01:30 happens twice on 2025-11-02 in New York.
    let out = convert(req("2025-11-02T01:30", "America/New_York", "UTC")).unwrap();
    assert_eq!(out.utc, "2025-11-02T05:30:00Z");
}

#[test]
fn skipped_time_is_rejected() {
    // 02:30 never happens on 2025-03-09 in New York.
    let err = convert(req("2025-03-09T02:30", "America/New_York", "UTC")).unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput { field: "datetime", .. }));
}

#[test]
fn unknown_zone_and_bad_datetime() {
    assert!(matches!(
        convert(req("2025-01-01T00:00", "Mars/Olympus", "UTC")),
        Err(ToolError::InvalidInput { field: "from", .. })
    ));
    assert!(matches!(
        convert(req("yesterday", "UTC", "UTC")),
        Err(ToolError::InvalidInput { field: "datetime", .. })
    ));
}

#[test]
fn world_clock_defaults_and_custom_zones() {
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
    let defaults = world_clock(WorldClockRequest::default(), now).unwrap();
    assert_eq!(defaults.zones.len(), DEFAULT_CLOCK_ZONES.len());
    assert_eq!(defaults.utc, "2025-01-01T12:00:00Z");

    let custom = world_clock(WorldClockRequest { zones: vec!["Asia/Tokyo".into()] }, now).unwrap();
    assert_eq!(custom.zones[0].zone, "Asia/Tokyo");
    assert_eq!(custom.zones[0].datetime, "2025-01-01T21:00:00");
}
