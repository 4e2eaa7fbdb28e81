//! URL slug generation.

use serde::{Deserialize, Serialize};

use crate::tools::{ToolError, lenient};

#[derive(Debug, Default, Deserialize)]
pub struct SlugRequest {
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
    #[serde(default)]
    pub separator: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    pub lowercase: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub max_length: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SlugResponse {
    pub slug: String,
    pub length: usize,
}

pub fn slug(req: SlugRequest) -> Result<SlugResponse, ToolError> {
    let separator = req.separator.unwrap_or_else(|| "-".into());
    if separator.len() > 3 || !separator.chars().all(|c| matches!(c, '-' | '_' | '.' | '~')) {
        return Err(ToolError::invalid("separator", "use up to three of `-`, `_`, `.`, `~`"));
    }
    if req.max_length == Some(0) {
        return Err(ToolError::invalid("max_length", "must be greater than zero"));
    }

    let mut out = slugify(&req.text, &separator, req.lowercase.unwrap_or(true));
    if let Some(max) = req.max_length {
        out = truncate(&out, &separator, max as usize);
    }
    Ok(SlugResponse { length: out.len(), slug: out })
}

#[must_use]
pub fn slugify(text: &str, separator: &str, lowercase: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_separator = false;
    for c in text.chars() {
        if matches!(c, '\'' | '’') {
            continue;
        }
        let folded = if c.is_ascii_alphanumeric() {
            Some(c.to_string())
        } else {
            fold(c).map(|ascii| if c.is_uppercase() { ascii.to_uppercase() } else { ascii.to_owned() })
        };
        match folded {
            Some(piece) => {
                if pending_separator && !out.is_empty() {
                    out.push_str(separator);
                }
                pending_separator = false;
                if lowercase { out.push_str(&piece.to_ascii_lowercase()) } else { out.push_str(&piece) }
            }
            None => pending_separator = true,
        }
    }
    out
}

/// Cut to `max` bytes, backing up to the last separator when the cut would
/// split a word.
fn truncate(slug: &str, separator: &str, max: usize) -> String {
    if slug.len() <= max {
        return slug.to_owned();
    }
    let head = &slug[..max];
    let splits_word = !separator.is_empty() && !slug[max..].starts_with(separator);
    let cut = if splits_word {
        head.rfind(separator).filter(|&at| at > 0).map_or(head, |at| &head[..at])
    } else {
        head
    };
    let mut cut = cut;
    while !separator.is_empty() && cut.ends_with(separator) {
        cut = &cut[..cut.len() - separator.len()];
    }
    cut.to_owned()
}

/// ASCII spelling of common Latin letters with diacritics (lower-case form).
fn fold(c: char) -> Option<&'static str> {
    let lower = c.to_lowercase().next()?;
    Some(match lower {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' | 'ĉ' | 'ċ' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
        'ğ' | 'ģ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => "i",
        'ķ' => "k",
        'ł' | 'ľ' | 'ĺ' | 'ļ' => "l",
        'ñ' | 'ń' | 'ň' | 'ņ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'œ' => "oe",
        'ŕ' | 'ř' => "r",
        'ś' | 'š' | 'ş' | 'ș' => "s",
        'ß' => "ss",
        'ť' | 'ţ' | 'ț' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    })
}

#[cfg(test)]
#[path = "slug_test.rs"]
mod tests;
