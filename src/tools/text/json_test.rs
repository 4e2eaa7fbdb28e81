use super::*;

fn req(text: &str, mode: Mode) -> JsonRequest {
    JsonRequest { text: text.into(), mode, indent: None, sort_keys: None }
}

#[test]
fn pretty_prints_with_default_indent() {
    let out = format(req(r#"{"b":1,"a":[true,null]}"#, Mode::Pretty)).unwrap();
    assert_eq!(out.output.as_deref(), Some("{\n  \"b\": 1,\n  \"a\": [\n    true,\n    null\n  ]\n}"));
    assert_eq!(out.root, Some("object"));
}

#[test]
fn pretty_respects_indent_and_sort_keys() {
    let out = format(JsonRequest {
        text: r#"{"b":{"z":1,"y":2},"a":0}"#.into(),
        mode: Mode::Pretty,
        indent: Some(4),
        sort_keys: Some(true),
    })
    .unwrap();
    assert_eq!(
        out.output.as_deref(),
        Some("{\n    \"a\": 0,\n    \"b\": {\n        \"y\": 2,\n        \"z\": 1\n    }\n}")
    );
}

#[test]
fn minify_strips_whitespace_and_keeps_order() {
    let out = format(req("{\n  \"b\" : 1,\n  \"a\" : \"x y\"\n}", Mode::Minify)).unwrap();
    assert_eq!(out.output.as_deref(), Some(r#"{"b":1,"a":"x y"}"#));
    assert!(out.output_size < out.input_size);
}

#[test]
fn invalid_json_reports_position() {
    let err = format(req("{\n  \"a\": ,\n}", Mode::Pretty)).unwrap_err();
    let ToolError::InvalidInput { field, reason } = err else { panic!("expected invalid input") };
    assert_eq!(field, "text");
    assert!(reason.starts_with("line 2 column"), "{reason}");
}

#[test]
fn validate_mode_reports_instead_of_failing() {
    let out = format(req("[1, 2", Mode::Validate)).unwrap();
    assert!(!out.valid);
    let problem = out.problem.unwrap();
    assert_eq!(problem.line, 1);
    assert!(!problem.message.contains(" at line "));

    let out = format(req("\"ok\"", Mode::Validate)).unwrap();
    assert!(out.valid);
    assert_eq!(out.root, Some("string"));
    assert!(out.output.is_none());
}

#[test]
fn indent_out_of_range() {
    let out = format(JsonRequest { text: "1".into(), mode: Mode::Pretty, indent: Some(9), sort_keys: None });
    assert!(matches!(out, Err(ToolError::InvalidInput { field: "indent", .. })));
}
