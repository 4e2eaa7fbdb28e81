use super::*;

#[test]
fn css_strips_comments_and_tightens_punctuation() {
    let source = "body {\n  color: red;\n  margin : 0 auto;\n}\n/* c */\na > b , c { x: 1 }";
    assert_eq!(css(source), "body{color:red;margin:0 auto}a>b,c{x:1}");
}

#[test]
fn css_keeps_strings_verbatim() {
    assert_eq!(css("a::after { content: \"a  b\"; }"), "a::after{content:\"a  b\"}");
    assert_eq!(css("p { font-family: 'x /* y */ z'; }"), "p{font-family:'x /* y */ z'}");
}

#[test]
fn html_collapses_whitespace_and_preserves_pre() {
    let source = "<div>\n  <p>Hello   world</p>\n  <!-- note -->\n  <pre>  keep\n   this </pre>\n</div>";
    assert_eq!(html(source), "<div><p>Hello world</p> <pre>  keep\n   this </pre> </div>");
    assert_eq!(html("<textarea>\n a  b\n</textarea>"), "<textarea>\n a  b\n</textarea>");
}

#[test]
fn js_strips_comments_outside_strings() {
    let source = "function add(a, b) {\n  // sum\n  return a + b; /* inline */\n}\nconst s = \"a  // b\";\n";
    assert_eq!(js(source), "function add(a,b){\nreturn a + b;\n}\nconst s=\"a  // b\";");
}

#[test]
fn js_keeps_template_literals_and_unary_spacing() {
    assert_eq!(js("let t = `line 1\n   line 2`;"), "let t=`line 1\n   line 2`;");
    assert_eq!(js("x = a - -b"), "x=a - -b");
}

#[test]
fn minify_reports_sizes() {
    let out = minify(MinifyRequest { text: "a  {  b : c ; }".into(), language: Language::Css }).unwrap();
    assert_eq!(out.output, "a{b:c}");
    assert_eq!(out.original_size, 15);
    assert_eq!(out.minified_size, 6);
    assert!((out.saving_percent - 60.0).abs() < f64::EPSILON);

    let empty = minify(MinifyRequest { text: String::new(), language: Language::Js }).unwrap();
    assert!(empty.saving_percent.abs() < f64::EPSILON);
}

#[test]
fn language_accepts_javascript_alias() {
    let req: MinifyRequest = serde_json::from_str(r#"{"text":"x","language":"javascript"}"#).unwrap();
    assert_eq!(req.language, Language::Js);
}
