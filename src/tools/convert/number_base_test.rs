use super::*;

fn req(value: &str, from_base: Option<u32>, to_base: Option<u32>) -> NumberBaseRequest {
    NumberBaseRequest { value: value.into(), from_base, to_base }
}

#[test]
fn decimal_to_common_bases() {
    let out = convert(req("255", None, None)).unwrap();
    assert_eq!(out.binary, "11111111");
    assert_eq!(out.octal, "377");
    assert_eq!(out.decimal, "255");
    assert_eq!(out.hexadecimal, "ff");
    assert!(out.converted.is_none());
}

#[test]
fn prefixes_separators_and_target_base() {
    let out = convert(req("0xFF_FF", Some(16), Some(36))).unwrap();
    assert_eq!(out.decimal, "65535");
    assert_eq!(out.converted.as_deref(), Some("1ekf"));

    let out = convert(req("0b1010", Some(2), None)).unwrap();
    assert_eq!(out.decimal, "10");
}

#[test]
fn negative_values_and_extremes() {
    assert_eq!(parse_in_base("-ff", Some(16)).unwrap(), -255);
    assert_eq!(format_in_base(-255, 2), "-11111111");
    assert_eq!(format_in_base(0, 7), "0");

    let min = format!("-{}", i128::MIN.unsigned_abs());
    assert_eq!(parse_in_base(&min, Some(10)).unwrap(), i128::MIN);
    assert!(parse_in_base(&i128::MIN.unsigned_abs().to_string(), None).is_err());
}

#[test]
fn rejects_bad_digits_and_bases() {
    assert!(convert(req("129", Some(2), None)).is_err());
    assert!(convert(req("", None, None)).is_err());
    assert!(matches!(
        convert(req("1", Some(37), None)),
        Err(ToolError::InvalidInput { field: "from_base", .. })
    ));
    assert!(matches!(
        convert(req("1", None, Some(1))),
        Err(ToolError::InvalidInput { field: "to_base", .. })
    ));
}

#[test]
fn prefix_picks_the_base_when_none_is_given() {
    assert_eq!(convert(req("0xff", None, None)).unwrap().decimal, "255");
    assert_eq!(convert(req("0o17", None, None)).unwrap().decimal, "15");
    assert_eq!(convert(req("0B101", None, None)).unwrap().decimal, "5");
    assert_eq!(parse_in_base("-0x10", None).unwrap(), -16);
    assert_eq!(parse_in_base("010", None).unwrap(), 10);
}

#[test]
fn prefix_conflicting_with_from_base_is_rejected() {
    let err = convert(req("0xff", Some(2), None)).unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput { field: "value", .. }));
    assert!(err.to_string().contains("base 16 but from_base is 2"), "{err}");

    assert!(convert(req("0o7", Some(10), None)).is_err());
}

#[test]
fn prefix_letters_that_are_digits_stay_digits() {
    assert_eq!(parse_in_base("0b1", Some(16)).unwrap(), 0xb1);
    assert_eq!(parse_in_base("0x1", Some(36)).unwrap(), 33 * 36 + 1);
}
