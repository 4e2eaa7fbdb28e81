//! Case conversion.

use serde::{Deserialize, Serialize};

use crate::tools::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Upper,
    Lower,
    Title,
    Sentence,
    Camel,
    Pascal,
    Snake,
    Kebab,
    Constant,
}

#[derive(Debug, Deserialize)]
pub struct CaseRequest {
    pub text: String,
    pub target: Target,
}

#[derive(Debug, Serialize)]
pub struct CaseResponse {
    pub target: Target,
    pub output: String,
}

pub fn convert(req: CaseRequest) -> Result<CaseResponse, ToolError> {
    Ok(CaseResponse { target: req.target, output: apply(&req.text, req.target) })
}

#[must_use]
pub fn apply(text: &str, target: Target) -> String {
    match target {
        Target::Upper => text.to_uppercase(),
        Target::Lower => text.to_lowercase(),
        Target::Title => title(text),
        Target::Sentence => sentence(text),
        Target::Camel => {
            let words = split_words(text);
            let mut out = String::new();
            for (i, word) in words.iter().enumerate() {
                if i == 0 { out.push_str(&word.to_lowercase()) } else { out.push_str(&capitalize(word)) }
            }
            out
        }
        Target::Pascal => split_words(text).iter().map(|w| capitalize(w)).collect(),
        Target::Snake => join_lower(text, "_"),
        Target::Kebab => join_lower(text, "-"),
        Target::Constant => join_lower(text, "_").to_uppercase(),
    }
}

fn join_lower(text: &str, separator: &str) -> String {
    split_words(text).iter().map(|w| w.to_lowercase()).collect::<Vec<_>>().join(separator)
}

/// Upper-case first character, lower-case the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn title(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if at_word_start { out.extend(c.to_uppercase()) } else { out.extend(c.to_lowercase()) }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = c != '\'' && c != '’';
        }
    }
    out
}

fn sentence(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut capitalize_next = true;
    for c in text.chars() {
        if c.is_alphabetic() && capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.extend(c.to_lowercase());
            if c.is_alphanumeric() {
                capitalize_next = false;
            } else if matches!(c, '.' | '!' | '?') {
                capitalize_next = true;
            }
        }
    }
    out
}

/// Split identifiers and prose into words: separators, lower-to-upper
/// transitions and the end of an acronym (`HTTPServer` -> `HTTP`, `Server`).
#[must_use]
pub fn split_words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
            let next = chars.get(i + 1).copied();
            let lower_to_upper = c.is_uppercase() && (prev.is_lowercase() || prev.is_numeric());
            let acronym_end = c.is_uppercase() && prev.is_uppercase() && next.is_some_and(char::is_lowercase);
            if (lower_to_upper || acronym_end) && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
#[path = "case_test.rs"]
mod tests;
