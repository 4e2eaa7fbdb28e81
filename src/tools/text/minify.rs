//! Whitespace and comment stripping for CSS, HTML and JavaScript.
//!
//! These are conservative single-pass scanners, not parsers. JavaScript
//! regular expression literals are not recognised, so a `//` inside one is
//! treated as a comment. Line breaks in JavaScript are kept so automatic
//! semicolon insertion still applies.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::tools::{ToolError, round_to};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Css,
    Html,
    #[serde(alias = "javascript")]
    Js,
}

#[derive(Debug, Deserialize)]
pub struct MinifyRequest {
    pub text: String,
    pub language: Language,
}

#[derive(Debug, Serialize)]
pub struct MinifyResponse {
    pub output: String,
    pub original_size: usize,
    pub minified_size: usize,
    pub saving_percent: f64,
}

pub fn minify(req: MinifyRequest) -> Result<MinifyResponse, ToolError> {
    let output = match req.language {
        Language::Css => css(&req.text),
        Language::Html => html(&req.text),
        Language::Js => js(&req.text),
    };
    let original_size = req.text.len();
    let minified_size = output.len();
    #[allow(clippy::cast_precision_loss)]
    let saving_percent = if original_size == 0 {
        0.0
    } else {
        round_to((original_size - minified_size.min(original_size)) as f64 / original_size as f64 * 100.0, 1)
    };
    Ok(MinifyResponse { output, original_size, minified_size, saving_percent })
}

// =============================================================================
// CSS
// =============================================================================

const CSS_TIGHT: &[char] = &['{', '}', ':', ';', ',', '>'];

#[must_use]
pub fn css(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut pending_space = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '"' || c == '\'' {
            push_gap(&mut out, &mut pending_space, c, CSS_TIGHT);
            i = copy_string(&chars, i, &mut out);
            continue;
        }
        if c == '/' && chars.get(i + 1) == Some(&'*') {
            i = skip_block_comment(&chars, i + 2).0;
            pending_space = true;
            continue;
        }
        if c.is_whitespace() {
            pending_space = true;
        } else {
            if c == '}' && out.ends_with(';') {
                out.pop();
            }
            push_gap(&mut out, &mut pending_space, c, CSS_TIGHT);
            out.push(c);
        }
        i += 1;
    }
    out
}

/// Emit one pending space unless either neighbour makes it redundant.
fn push_gap(out: &mut String, pending: &mut bool, next: char, tight: &[char]) {
    if std::mem::take(pending) && out.chars().next_back().is_some_and(|last| !tight.contains(&last)) && !tight.contains(&next) {
        out.push(' ');
    }
}

/// Copy a quoted string starting at `start` verbatim; returns the index after it.
fn copy_string(chars: &[char], start: usize, out: &mut String) -> usize {
    let quote = chars[start];
    out.push(quote);
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        out.push(c);
        i += 1;
        if c == '\\' {
            if let Some(&escaped) = chars.get(i) {
                out.push(escaped);
                i += 1;
            }
        } else if c == quote {
            break;
        }
    }
    i
}

/// Skip to just past the closing `*/`; reports whether the comment spanned lines.
fn skip_block_comment(chars: &[char], mut i: usize) -> (usize, bool) {
    let mut newline = false;
    while i < chars.len() {
        if chars[i] == '*' && chars.get(i + 1) == Some(&'/') {
            return (i + 2, newline);
        }
        newline |= chars[i] == '\n';
        i += 1;
    }
    (i, newline)
}

// =============================================================================
// HTML
// =============================================================================

static PRESERVED: OnceLock<Regex> = OnceLock::new();
static COMMENT: OnceLock<Regex> = OnceLock::new();
static BETWEEN_TAGS: OnceLock<Regex> = OnceLock::new();
static WHITESPACE: OnceLock<Regex> = OnceLock::new();

#[must_use]
pub fn html(source: &str) -> String {
    let preserved = PRESERVED
        .get_or_init(|| Regex::new(r"(?is)<pre\b.*?</pre\s*>|<textarea\b.*?</textarea\s*>").expect("preserved block regex is valid"));

    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    for m in preserved.find_iter(source) {
        out.push_str(&collapse_html(&source[last..m.start()]));
        out.push_str(m.as_str());
        last = m.end();
    }
    out.push_str(&collapse_html(&source[last..]));
    out.trim().to_owned()
}

fn collapse_html(segment: &str) -> String {
    let comment = COMMENT.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("comment regex is valid"));
    let between = BETWEEN_TAGS.get_or_init(|| Regex::new(r">\s+<").expect("inter-tag regex is valid"));
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

    let text = comment.replace_all(segment, "");
    let text = between.replace_all(&text, "><");
    whitespace.replace_all(&text, " ").into_owned()
}

// =============================================================================
// JAVASCRIPT
// =============================================================================

const JS_TIGHT: &[char] = &['{', '}', '(', ')', '[', ']', ';', ',', ':', '=', '<', '>', '!', '&', '|', '?', '*', '%', '^'];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Gap {
    None,
    Space,
    Newline,
}

#[must_use]
pub fn js(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut gap = Gap::None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if c == '/' && next == Some('/') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }
        if c == '/' && next == Some('*') {
            let (end, spanned) = skip_block_comment(&chars, i + 2);
            i = end;
            gap = widen(gap, if spanned { Gap::Newline } else { Gap::Space });
            continue;
        }
        if c.is_whitespace() {
            gap = widen(gap, if c == '\n' { Gap::Newline } else { Gap::Space });
            i += 1;
            continue;
        }

        match std::mem::replace(&mut gap, Gap::None) {
            Gap::Newline if !out.is_empty() => out.push('\n'),
            Gap::Space if out.chars().next_back().is_some_and(|last| !JS_TIGHT.contains(&last) && last != '\n') && !JS_TIGHT.contains(&c) => {
                out.push(' ');
            }
            _ => {}
        }

        if c == '"' || c == '\'' || c == '`' {
            i = copy_string(&chars, i, &mut out);
        } else {
            out.push(c);
            i += 1;
        }
    }
    out
}

fn widen(current: Gap, seen: Gap) -> Gap {
    if current == Gap::Newline || seen == Gap::Newline { Gap::Newline } else { Gap::Space }
}

#[cfg(test)]
#[path = "minify_test.rs"]
mod tests;
