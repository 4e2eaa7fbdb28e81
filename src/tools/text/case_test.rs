use super::*;

#[test]
fn splits_identifiers_and_prose() {
    assert_eq!(split_words("helloWorld"), vec!["hello", "World"]);
    assert_eq!(split_words("HTTPServer error_code-42"), vec!["HTTP", "Server", "error", "code", "42"]);
    assert_eq!(split_words("  spaced   out  "), vec!["spaced", "out"]);
    assert_eq!(split_words("version2Beta"), vec!["version2", "Beta"]);
}

#[test]
fn identifier_cases() {
    let text = "Hello brave-new World";
    assert_eq!(apply(text, Target::Camel), "helloBraveNewWorld");
    assert_eq!(apply(text, Target::Pascal), "HelloBraveNewWorld");
    assert_eq!(apply(text, Target::Snake), "hello_brave_new_world");
    assert_eq!(apply(text, Target::Kebab), "hello-brave-new-world");
    assert_eq!(apply(text, Target::Constant), "HELLO_BRAVE_NEW_WORLD");
    assert_eq!(apply("parseHTTPResponse", Target::Snake), "parse_http_response");
}

#[test]
fn prose_cases() {
    assert_eq!(apply("the QUICK brown fox's tail", Target::Title), "The Quick Brown Fox's Tail");
    assert_eq!(apply("HELLO THERE. how ARE you? fine!", Target::Sentence), "Hello there. How are you? Fine!");
    assert_eq!(apply("Straße", Target::Upper), "STRASSE");
    assert_eq!(apply("ÉCOLE", Target::Lower), "école");
}

#[test]
fn empty_input() {
    assert_eq!(apply("", Target::Camel), "");
    assert_eq!(apply("___", Target::Snake), "");
}

#[test]
fn target_names_on_the_wire() {
    let req: CaseRequest = serde_json::from_str(r#"{"text":"a b","target":"constant"}"#).unwrap();
    assert_eq!(convert(req).unwrap().output, "A_B");
}
