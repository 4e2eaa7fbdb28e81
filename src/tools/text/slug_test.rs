use super::*;

fn run(text: &str) -> String {
    slug(SlugRequest { text: text.into(), ..Default::default() }).unwrap().slug
}

#[test]
fn basic_slugs() {
    assert_eq!(run("Hello, World!"), "hello-world");
    assert_eq!(run("  --Already--slugged--  "), "already-slugged");
    assert_eq!(run("Don't Stop Me Now"), "dont-stop-me-now");
    assert_eq!(run("100% pure & simple"), "100-pure-simple");
}

#[test]
fn folds_diacritics_and_drops_other_symbols() {
    assert_eq!(run("Crème Brûlée à la Française"), "creme-brulee-a-la-francaise");
    assert_eq!(run("Straße Łódź Æsir"), "strasse-lodz-aesir");
    assert_eq!(run("emoji 🎉 party 日本"), "emoji-party");
}

#[test]
fn separator_and_case_options() {
    let out = slug(SlugRequest {
        text: "Über Cool Title".into(),
        separator: Some("_".into()),
        lowercase: Some(false),
        max_length: None,
    })
    .unwrap();
    assert_eq!(out.slug, "Uber_Cool_Title");
    assert!(slug(SlugRequest { text: "x".into(), separator: Some("/".into()), ..Default::default() }).is_err());
}

#[test]
fn max_length_cuts_at_separator() {
    let out = slug(SlugRequest { text: "the quick brown fox".into(), max_length: Some(12), ..Default::default() }).unwrap();
    assert_eq!(out.slug, "the-quick");
    assert_eq!(out.length, 9);

    // Cut falls exactly on a boundary.
    let out = slug(SlugRequest { text: "the quick brown fox".into(), max_length: Some(9), ..Default::default() }).unwrap();
    assert_eq!(out.slug, "the-quick");

    // A single long word is cut mid-word.
    let out = slug(SlugRequest { text: "supercalifragilistic".into(), max_length: Some(5), ..Default::default() }).unwrap();
    assert_eq!(out.slug, "super");
}
