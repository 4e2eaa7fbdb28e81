//! Word frequency and text statistics.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::tools::{ToolError, lenient, round_to};

pub const WORDS_PER_MINUTE: usize = 200;
const DEFAULT_TOP: u32 = 20;

const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "because", "been", "but", "by",
    "can", "could", "did", "do", "does", "for", "from", "had", "has", "have", "he", "her", "his", "how", "i", "if",
    "in", "into", "is", "it", "its", "just", "me", "my", "no", "not", "of", "on", "or", "our", "she", "so", "some",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "to", "too", "up", "us", "was",
    "we", "were", "what", "when", "which", "who", "will", "with", "would", "you", "your",
];

static WORD: OnceLock<Regex> = OnceLock::new();
static SENTENCE_END: OnceLock<Regex> = OnceLock::new();
static PARAGRAPH_BREAK: OnceLock<Regex> = OnceLock::new();

fn word_regex() -> &'static Regex {
    WORD.get_or_init(|| Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}\p{N}]+)*").expect("word regex is valid"))
}

/// Lower-cased words in order of appearance.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    word_regex().find_iter(text).map(|m| m.as_str().to_lowercase())
}

#[derive(Debug, Deserialize)]
pub struct WordFrequencyRequest {
    pub text: String,
    /// Number of entries to return; 0 returns every word.
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub top: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    pub ignore_stop_words: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub min_length: Option<u32>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TextStats {
    pub words: usize,
    pub unique_words: usize,
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub reading_time_minutes: usize,
}

#[derive(Debug, Serialize)]
pub struct WordFrequencyResponse {
    pub stats: TextStats,
    pub frequencies: Vec<WordCount>,
}

pub fn word_frequency(req: WordFrequencyRequest) -> Result<WordFrequencyResponse, ToolError> {
    let ignore_stop_words = req.ignore_stop_words.unwrap_or(false);
    let min_length = req.min_length.unwrap_or(1) as usize;

    let all: Vec<String> = tokenize(&req.text).collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in &all {
        if word.chars().count() < min_length || (ignore_stop_words && STOP_WORDS.contains(&word.as_str())) {
            continue;
        }
        *counts.entry(word.as_str()).or_default() += 1;
    }
    let counted: usize = counts.values().sum();

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let top = req.top.unwrap_or(DEFAULT_TOP) as usize;
    if top > 0 {
        ranked.truncate(top);
    }

    #[allow(clippy::cast_precision_loss)]
    let frequencies = ranked
        .into_iter()
        .map(|(word, count)| WordCount {
            word: word.to_owned(),
            count,
            percent: round_to(count as f64 / counted as f64 * 100.0, 2),
        })
        .collect();

    Ok(WordFrequencyResponse { stats: stats(&req.text, &all), frequencies })
}

fn stats(text: &str, words: &[String]) -> TextStats {
    let sentence_end = SENTENCE_END.get_or_init(|| Regex::new(r"[.!?]+").expect("sentence regex is valid"));
    let paragraph_break = PARAGRAPH_BREAK.get_or_init(|| Regex::new(r"\n\s*\n").expect("paragraph regex is valid"));
    let has_word = |s: &str| s.chars().any(char::is_alphanumeric);

    let mut unique: Vec<&str> = words.iter().map(String::as_str).collect();
    unique.sort_unstable();
    unique.dedup();

    TextStats {
        words: words.len(),
        unique_words: unique.len(),
        characters: text.chars().count(),
        characters_no_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
        sentences: sentence_end.split(text).filter(|s| has_word(s)).count(),
        paragraphs: paragraph_break.split(text).filter(|p| !p.trim().is_empty()).count(),
        reading_time_minutes: words.len().div_ceil(WORDS_PER_MINUTE),
    }
}

#[cfg(test)]
#[path = "words_test.rs"]
mod tests;
