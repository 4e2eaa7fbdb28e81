use super::*;

fn req(value: f64, from: &str, to: &str) -> ConvertRequest {
    ConvertRequest { value, from: from.into(), to: to.into() }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn length_converts_through_meters() {
    let out = convert(&LENGTH, req(1.0, "mile", "km")).unwrap();
    assert_eq!(out.from, "mile");
    assert_eq!(out.to, "kilometer");
    assert!(approx(out.result, 1.609_344));
    assert!(approx(out.all["foot"], 5280.0));
}

#[test]
fn unit_lookup_accepts_symbols_plurals_and_case() {
    assert_eq!(LENGTH.find("Feet").map(|u| u.id), Some("foot"));
    assert_eq!(LENGTH.find("inches").map(|u| u.id), Some("inch"));
    assert_eq!(LENGTH.find("Kilometers").map(|u| u.id), Some("kilometer"));
    assert_eq!(AREA.find("sq ft").map(|u| u.id), Some("square_foot"));
    assert_eq!(VOLUME.find("fl-oz").map(|u| u.id), Some("fluid_ounce"));
    assert!(LENGTH.find("parsec").is_none());
}

#[test]
fn british_spellings_resolve() {
    assert_eq!(LENGTH.find("metre").map(|u| u.id), Some("meter"));
    assert_eq!(LENGTH.find("Kilometres").map(|u| u.id), Some("kilometer"));
    assert_eq!(LENGTH.find("millimetre").map(|u| u.id), Some("millimeter"));
    assert_eq!(AREA.find("square metres").map(|u| u.id), Some("square_meter"));
    assert_eq!(VOLUME.find("cubic metre").map(|u| u.id), Some("cubic_meter"));
    assert_eq!(VOLUME.find("litres").map(|u| u.id), Some("liter"));

    let out = convert(&LENGTH, req(2.5, "centimetre", "metre")).unwrap();
    assert!(approx(out.result, 0.025));
}

#[test]
fn weight_pounds_to_kilograms() {
    let out = convert(&WEIGHT, req(10.0, "lb", "kg")).unwrap();
    assert!(approx(out.result, 4.535_923_7));
}

#[test]
fn area_and_volume_factors() {
    let acre = convert(&AREA, req(1.0, "acre", "ft2")).unwrap();
    assert!(approx(acre.result, 43_560.0));

    let gallon = convert(&VOLUME, req(1.0, "gallon", "cup")).unwrap();
    assert!(approx(gallon.result, 16.0));
}

#[test]
fn unknown_unit_names_the_family() {
    let err = convert(&WEIGHT, req(1.0, "meter", "kg")).unwrap_err();
    match err {
        ToolError::UnknownUnit(msg) => assert!(msg.contains("weight")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn significant_hides_factor_noise() {
    assert!(approx(significant(0.304_800_000_000_000_02), 0.3048));
    assert!(approx(significant(0.0), 0.0));
    assert!(approx(significant(-12.5), -12.5));
}

#[test]
fn temperature_scales() {
    let out = temperature(req(100.0, "C", "F")).unwrap();
    assert!(approx(out.result, 212.0));
    assert!(approx(out.all["kelvin"], 373.15));
    assert!(approx(out.all["rankine"], 671.67));

    let out = temperature(req(-40.0, "fahrenheit", "celsius")).unwrap();
    assert!(approx(out.result, -40.0));
}

#[test]
fn temperature_rejects_below_absolute_zero() {
    assert!(temperature(req(-300.0, "celsius", "kelvin")).is_err());
    let zero = temperature(req(0.0, "kelvin", "celsius")).unwrap();
    assert!(approx(zero.result, -273.15));
}
