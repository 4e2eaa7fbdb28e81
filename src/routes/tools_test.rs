use super::*;

#[test]
fn tool_error_to_status_maps_unknown_tool_to_not_found() {
    let err = ToolError::UnknownTool("nope".into());
    assert_eq!(tool_error_to_status(&err), StatusCode::NOT_FOUND);
}

#[test]
fn tool_error_to_status_maps_user_errors_to_bad_request() {
    for err in [
        ToolError::invalid("bill", "must be positive"),
        ToolError::UnknownUnit("parsec".into()),
        ToolError::Malformed("expected an object".into()),
    ] {
        assert_eq!(tool_error_to_status(&err), StatusCode::BAD_REQUEST);
    }
}

#[test]
fn api_error_keeps_tool_error_code_and_message() {
    let err = ApiError::from(ToolError::invalid("bill", "must be positive"));
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.code, "invalid_input");
    assert_eq!(err.message, "invalid bill: must be positive");
}

#[test]
fn decode_body_treats_empty_as_defaults() {
    assert_eq!(decode_body(b"").unwrap(), json!({}));
    assert_eq!(decode_body(b" \n").unwrap(), json!({}));
    assert_eq!(decode_body(br#"{"text":"hi"}"#).unwrap(), json!({ "text": "hi" }));
}

#[test]
fn decode_body_rejects_broken_json() {
    let err = decode_body(b"{\"text\":").unwrap_err();
    assert!(matches!(err, ToolError::Malformed(_)));
}

#[tokio::test]
async fn describe_tool_returns_descriptor() {
    let Json(tool) = describe_tool(Path("slug".into())).await.unwrap();
    assert_eq!(tool.id, "slug");
    assert_eq!(tool.category, "text");
}

#[tokio::test]
async fn list_categories_includes_every_tool_once() {
    let Json(summaries) = list_categories().await;
    assert_eq!(summaries.len(), catalog::categories().len());
    let total: usize = summaries.iter().map(|s| s.tools.len()).sum();
    assert_eq!(total, catalog::tools().len());
}
