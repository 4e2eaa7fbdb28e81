use chrono::TimeZone;
use serde_json::json;

use super::*;

fn ctx(rates: &CurrencyRates) -> ToolContext<'_> {
    ToolContext { rates, now: Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap() }
}

#[test]
fn dispatches_form_style_bodies() {
    let rates = CurrencyRates::default();
    let out = execute(&ctx(&rates), "bmi", json!({ "weight": "70", "height": "175", "units": "metric" })).unwrap();
    assert_eq!(out["bmi"], json!(22.86));
}

#[test]
fn age_uses_context_date() {
    let rates = CurrencyRates::default();
    let out = execute(&ctx(&rates), "age", json!({ "birth_date": "1990-05-15" })).unwrap();
    assert_eq!(out["years"], json!(33));
}

#[test]
fn unknown_tool() {
    let rates = CurrencyRates::default();
    let err = execute(&ctx(&rates), "teleport", json!({})).unwrap_err();
    assert!(matches!(err, ToolError::UnknownTool(ref id) if id == "teleport"));
    assert_eq!(err.code(), "unknown_tool");
}

#[test]
fn malformed_body() {
    let rates = CurrencyRates::default();
    let err = execute(&ctx(&rates), "tip", json!({ "bill": [1, 2] })).unwrap_err();
    assert!(matches!(err, ToolError::Malformed(_)));
    assert_eq!(err.code(), "malformed_request");
}

#[test]
fn validation_errors_carry_field_names() {
    let rates = CurrencyRates::default();
    let err = execute(&ctx(&rates), "roman", json!({ "value": "IIII" })).unwrap_err();
    assert_eq!(err.code(), "invalid_input");
    assert!(err.to_string().starts_with("invalid value:"));

    let err = execute(&ctx(&rates), "length", json!({ "value": 1, "from": "parsec", "to": "m" })).unwrap_err();
    assert_eq!(err.code(), "unknown_unit");
}

#[test]
fn numeric_helpers() {
    assert!(require_positive("x", 0.0).is_err());
    assert!(require_positive("x", f64::NAN).is_err());
    assert!(require_non_negative("x", 0.0).is_ok());
    assert!(require_non_negative("x", -0.01).is_err());
    assert!((round_to(1.23456, 3) - 1.235).abs() < f64::EPSILON);
    assert!((cents(10.005_1) - 10.01).abs() < f64::EPSILON);
}
