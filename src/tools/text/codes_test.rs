use super::*;

#[test]
fn code128_patterns_are_well_formed() {
    for (value, pattern) in PATTERNS.iter().enumerate() {
        let modules: u32 = pattern.bytes().map(|b| u32::from(b - b'0')).sum();
        let expected = if value == STOP { 13 } else { 11 };
        assert_eq!(modules, expected, "pattern {value}");
    }
    let mut unique = PATTERNS.to_vec();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), PATTERNS.len());
}

#[test]
fn code128_checksum() {
    assert_eq!(encode_code128b("A").unwrap(), vec![START_B, 33, 34, STOP]);
    let symbols = encode_code128b("Hello").unwrap();
    assert_eq!(symbols[symbols.len() - 2], 76);
}

#[test]
fn barcode_svg_dimensions() {
    let out = barcode(BarcodeRequest { text: "Hello".into(), ..Default::default() }).unwrap();
    // start + 5 data + checksum at 11 modules, stop at 13, quiet zones at 10 each.
    assert_eq!(out.width, (11 * 7 + 13 + 20) * 2);
    assert_eq!(out.height, 80);
    assert!(out.svg.starts_with("<svg"));
    assert!(out.svg.ends_with("</svg>"));
    // Each symbol has three bars, the stop pattern four.
    assert_eq!(out.svg.matches("fill=\"#000000\"").count(), 3 * 7 + 4);
}

#[test]
fn barcode_rejects_non_printable_and_bad_sizes() {
    assert!(barcode(BarcodeRequest { text: "tab\there".into(), ..Default::default() }).is_err());
    assert!(barcode(BarcodeRequest { text: "é".into(), ..Default::default() }).is_err());
    assert!(barcode(BarcodeRequest { text: String::new(), ..Default::default() }).is_err());
    assert!(matches!(
        barcode(BarcodeRequest { text: "x".into(), module_width: Some(0), ..Default::default() }),
        Err(ToolError::InvalidInput { field: "module_width", .. })
    ));
}

#[test]
fn qr_code_renders_svg() {
    let out = qr_code(QrRequest { text: "hello".into(), ..Default::default() }).unwrap();
    assert_eq!(out.version, 1);
    assert_eq!(out.modules, 21);
    assert_eq!(out.ecc, "M");
    assert!(out.svg.contains("<svg"));
}

#[test]
fn qr_code_ecc_and_size_validation() {
    let out = qr_code(QrRequest { text: "hello".into(), ecc: Some("h".into()), size: Some(128) }).unwrap();
    assert_eq!(out.ecc, "H");
    assert!(qr_code(QrRequest { text: "hello".into(), ecc: Some("Z".into()), size: None }).is_err());
    assert!(qr_code(QrRequest { text: "hello".into(), ecc: None, size: Some(10) }).is_err());
    assert!(qr_code(QrRequest { text: String::new(), ..Default::default() }).is_err());
}

#[test]
fn qr_code_rejects_oversized_payload() {
    let text = "x".repeat(5000);
    assert!(matches!(
        qr_code(QrRequest { text, ..Default::default() }),
        Err(ToolError::InvalidInput { field: "text", .. })
    ));
}
