use super::*;

#[test]
fn accepts_common_addresses() {
    for email in ["user@example.com", "first.last+tag@sub.Example.co.uk", "o'brien@mail-server.io", "x@a.bc"] {
        let out = check(email);
        assert!(out.valid, "{email}: {:?}", out.problems);
    }
}

#[test]
fn splits_and_normalizes_domain() {
    let out = validate(EmailRequest { email: "  Jane.Doe@Example.COM ".into() }).unwrap();
    assert!(out.valid);
    assert_eq!(out.local.as_deref(), Some("Jane.Doe"));
    assert_eq!(out.domain.as_deref(), Some("example.com"));
}

#[test]
fn reports_problems() {
    let cases = [
        ("", "address is empty"),
        ("no-at-sign", "missing `@`"),
        ("@example.com", "local part is empty"),
        (".dot@example.com", "local part starts or ends with a dot"),
        ("a..b@example.com", "local part contains consecutive dots"),
        ("a b@example.com", "local part contains ` `"),
        ("a@b@example.com", "local part contains `@`"),
        ("user@localhost", "domain needs at least one dot"),
        ("user@-bad.com", "domain label `-bad` starts or ends with a hyphen"),
        ("user@exa_mple.com", "domain label `exa_mple` contains invalid characters"),
        ("user@example..com", "domain contains an empty label"),
        ("user@example.c", "top-level domain must be at least two letters"),
        ("user@example.123", "top-level domain must be at least two letters"),
    ];
    for (email, problem) in cases {
        let out = check(email);
        assert!(!out.valid, "{email} should be invalid");
        assert!(out.problems.iter().any(|p| p == problem), "{email}: {:?}", out.problems);
    }
}

#[test]
fn length_limits() {
    let local = "a".repeat(65);
    assert!(check(&format!("{local}@example.com")).problems.iter().any(|p| p.contains("64")));

    let label = "b".repeat(64);
    assert!(!check(&format!("user@{label}.com")).valid);

    let long = format!("user@{}.com", vec!["c".repeat(60); 5].join("."));
    assert!(check(&long).problems.iter().any(|p| p.contains("254")));
}
