use super::*;

fn req(amount: f64, from: &str, to: &str) -> CurrencyRequest {
    CurrencyRequest { amount, from: from.into(), to: to.into() }
}

#[test]
fn builtin_table_is_usd_based() {
    let rates = CurrencyRates::default();
    assert_eq!(rates.base(), "USD");
    assert!(rates.len() > 30);
}

#[test]
fn converts_through_base_currency_case_insensitively() {
    let rates = CurrencyRates::from_json(r#"{"base":"USD","rates":{"EUR":0.8,"GBP":0.5}}"#).unwrap();
    let out = convert(&rates, req(100.0, "eur", "gbp")).unwrap();
    assert_eq!(out.from, "EUR");
    assert_eq!(out.to, "GBP");
    assert!((out.result - 62.5).abs() < 1e-9);
    assert!((out.rate - 0.625).abs() < 1e-9);
    assert!((out.inverse_rate - 1.6).abs() < 1e-9);
    assert_eq!(out.supported, vec!["EUR", "GBP", "USD"]);
}

#[test]
fn unknown_code_is_invalid_input() {
    let err = convert(&CurrencyRates::default(), req(1.0, "USD", "XYZ")).unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput { field: "to", .. }));
}

#[test]
fn from_json_rejects_bad_rates() {
    assert!(matches!(
        CurrencyRates::from_json(r#"{"base":"USD","rates":{"EUR":-1}}"#),
        Err(RatesError::InvalidRate { .. })
    ));
    assert!(matches!(
        CurrencyRates::from_json(r#"{"base":"USD","rates":{"USD":2}}"#),
        Err(RatesError::InvalidRate { .. })
    ));
    assert!(matches!(CurrencyRates::from_json("not json"), Err(RatesError::Parse(_))));
}

#[test]
fn load_reports_missing_file() {
    let err = CurrencyRates::load(Path::new("/nonexistent/rates.json")).unwrap_err();
    assert!(matches!(err, RatesError::Read { .. }));
}
