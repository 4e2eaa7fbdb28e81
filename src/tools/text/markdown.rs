//! Naive Markdown to HTML conversion.
//!
//! Block structure is recognised line by line: fenced code, ATX headings,
//! horizontal rules, blockquotes (rendered recursively), ordered and
//! unordered lists, and paragraphs separated by blank lines. Inline markup
//! covers code spans, images, links, bold and italic. Raw HTML in the source
//! is escaped, never passed through.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::tools::ToolError;

#[derive(Debug, Deserialize)]
pub struct MarkdownRequest {
    pub text: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Heading {
    pub level: usize,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct MarkdownResponse {
    pub html: String,
    pub headings: Vec<Heading>,
}

pub fn convert(req: MarkdownRequest) -> Result<MarkdownResponse, ToolError> {
    Ok(MarkdownResponse { html: to_html(&req.text), headings: outline(&req.text) })
}

/// ATX headings in document order. Fenced code is skipped the same way
/// `to_html` skips it.
#[must_use]
pub fn outline(source: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut lines = source.lines();
    while let Some(line) = lines.next() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            lines.by_ref().take_while(|l| !l.trim_start().starts_with("```")).for_each(drop);
        } else if let Some((level, text)) = heading(trimmed) {
            headings.push(Heading { level, text: text.to_owned() });
        }
    }
    headings
}

// =============================================================================
// BLOCKS
// =============================================================================

enum Pending<'a> {
    None,
    Paragraph(Vec<&'a str>),
    Quote(Vec<&'a str>),
    List { ordered: bool, items: Vec<String> },
}

#[must_use]
pub fn to_html(source: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut pending = Pending::None;
    let mut lines = source.lines();

    while let Some(line) = lines.next() {
        let trimmed = line.trim();

        if let Some(info) = trimmed.strip_prefix("```") {
            flush(&mut out, &mut pending);
            let code: Vec<&str> = lines.by_ref().take_while(|l| !l.trim_start().starts_with("```")).collect();
            out.push(code_block(info.trim(), &code));
        } else if trimmed.is_empty() {
            flush(&mut out, &mut pending);
        } else if let Some((level, text)) = heading(trimmed) {
            flush(&mut out, &mut pending);
            out.push(format!("<h{level}>{}</h{level}>", inline(text)));
        } else if is_rule(trimmed) {
            flush(&mut out, &mut pending);
            out.push("<hr>".into());
        } else if let Some(rest) = trimmed.strip_prefix('>') {
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            match &mut pending {
                Pending::Quote(lines) => lines.push(rest),
                _ => {
                    flush(&mut out, &mut pending);
                    pending = Pending::Quote(vec![rest]);
                }
            }
        } else if let Some((ordered, item)) = list_item(trimmed) {
            match &mut pending {
                Pending::List { ordered: current, items } if *current == ordered => items.push(item.to_owned()),
                _ => {
                    flush(&mut out, &mut pending);
                    pending = Pending::List { ordered, items: vec![item.to_owned()] };
                }
            }
        } else {
            let indented = line.starts_with(char::is_whitespace);
            match &mut pending {
                Pending::Paragraph(lines) => lines.push(trimmed),
                Pending::List { items, .. } if indented => {
                    if let Some(last) = items.last_mut() {
                        last.push(' ');
                        last.push_str(trimmed);
                    }
                }
                _ => {
                    flush(&mut out, &mut pending);
                    pending = Pending::Paragraph(vec![trimmed]);
                }
            }
        }
    }
    flush(&mut out, &mut pending);
    out.join("\n")
}

fn flush(out: &mut Vec<String>, pending: &mut Pending<'_>) {
    match std::mem::replace(pending, Pending::None) {
        Pending::None => {}
        Pending::Paragraph(lines) => out.push(format!("<p>{}</p>", inline(&lines.join("\n")))),
        Pending::Quote(lines) => out.push(format!("<blockquote>\n{}\n</blockquote>", to_html(&lines.join("\n")))),
        Pending::List { ordered, items } => {
            let tag = if ordered { "ol" } else { "ul" };
            let mut html = format!("<{tag}>");
            for item in items {
                html.push_str(&format!("\n<li>{}</li>", inline(&item)));
            }
            html.push_str(&format!("\n</{tag}>"));
            out.push(html);
        }
    }
}

fn code_block(info: &str, lines: &[&str]) -> String {
    let body = escape_html(&lines.join("\n"));
    let language = info.split_whitespace().next().filter(|lang| lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '+'));
    match language {
        Some(lang) => format!("<pre><code class=\"language-{lang}\">{body}</code></pre>"),
        None => format!("<pre><code>{body}</code></pre>"),
    }
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    Some((level, rest.trim().trim_end_matches('#').trim_end()))
}

fn is_rule(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_'].iter().any(|marker| compact.chars().all(|c| c == *marker))
}

fn list_item(line: &str) -> Option<(bool, &str)> {
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some((false, rest.trim()));
        }
    }
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if (1..=9).contains(&digits) {
        let rest = &line[digits..];
        if let Some(item) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return Some((true, item.trim()));
        }
    }
    None
}

// =============================================================================
// INLINE
// =============================================================================

static CODE_SPAN: OnceLock<Regex> = OnceLock::new();
static IMAGE: OnceLock<Regex> = OnceLock::new();
static LINK: OnceLock<Regex> = OnceLock::new();
static BOLD: OnceLock<Regex> = OnceLock::new();
static STAR_ITALIC: OnceLock<Regex> = OnceLock::new();
static UNDERSCORE_ITALIC: OnceLock<Regex> = OnceLock::new();

fn code_span_regex() -> &'static Regex {
    CODE_SPAN.get_or_init(|| Regex::new(r"`([^`]+)`").expect("code span regex is valid"))
}

/// Inline markup for one block of text. Code spans are escaped and left
/// untouched by the other rules.
#[must_use]
pub fn inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in code_span_regex().captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else { continue };
        out.push_str(&emphasis(&escape_html(&text[last..whole.start()])));
        out.push_str("<code>");
        out.push_str(&escape_html(inner.as_str()));
        out.push_str("</code>");
        last = whole.end();
    }
    out.push_str(&emphasis(&escape_html(&text[last..])));
    out
}

fn emphasis(escaped: &str) -> String {
    let image = IMAGE.get_or_init(|| Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)\)").expect("image regex is valid"));
    let link = LINK.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").expect("link regex is valid"));
    let bold = BOLD.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*|__(.+?)__").expect("bold regex is valid"));
    let star = STAR_ITALIC.get_or_init(|| Regex::new(r"\*([^*\s](?:[^*]*[^*\s])?)\*").expect("italic regex is valid"));
    let underscore = UNDERSCORE_ITALIC.get_or_init(|| {
        Regex::new(r"(^|[^A-Za-z0-9_])_([^_\s](?:[^_]*[^_\s])?)_($|[^A-Za-z0-9_])").expect("italic regex is valid")
    });

    let text = image.replace_all(escaped, |c: &Captures| format!("<img src=\"{}\" alt=\"{}\">", safe_url(&c[2]), &c[1]));
    let text = link.replace_all(&text, |c: &Captures| format!("<a href=\"{}\">{}</a>", safe_url(&c[2]), &c[1]));
    let text = bold.replace_all(&text, |c: &Captures| {
        let inner = c.get(1).or_else(|| c.get(2)).map_or("", |m| m.as_str());
        format!("<strong>{inner}</strong>")
    });
    let text = star.replace_all(&text, "<em>${1}</em>");
    underscore.replace_all(&text, "${1}<em>${2}</em>${3}").into_owned()
}

fn safe_url(url: &str) -> &str {
    let lower = url.trim().to_ascii_lowercase();
    if lower.starts_with("javascript:") || lower.starts_with("vbscript:") || lower.starts_with("data:text/html") {
        "#"
    } else {
        url
    }
}

#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "markdown_test.rs"]
mod tests;
