//! Form-style field deserializers.
//!
//! Browser forms submit everything as text, so numeric fields accept either
//! a JSON number or a numeric string ("1,250.50" included), and text fields
//! accept a bare number. Non-finite values are rejected here so tools never
//! see `NaN`.

use serde::de::{Deserialize, Deserializer, Error};
use serde_json::Value;

/// Required `f64` field.
pub fn number<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    match Value::deserialize(de)? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).ok_or_else(|| D::Error::custom("number out of range")),
        Value::String(s) => parse_number(&s).map_err(D::Error::custom),
        other => Err(D::Error::custom(format!("expected a number, got {}", kind(&other)))),
    }
}

/// Optional `f64` field. `null` and blank strings mean absent.
pub fn opt_number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    match Value::deserialize(de)? {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| D::Error::custom("number out of range")),
        Value::String(s) => parse_number(&s).map(Some).map_err(D::Error::custom),
        other => Err(D::Error::custom(format!("expected a number, got {}", kind(&other)))),
    }
}

/// Required whole, non-negative `u32` field.
pub fn count<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
    let value = number(de)?;
    to_count(value).map_err(D::Error::custom)
}

/// Optional whole, non-negative `u32` field.
pub fn opt_count<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u32>, D::Error> {
    match opt_number(de)? {
        Some(value) => to_count(value).map(Some).map_err(D::Error::custom),
        None => Ok(None),
    }
}

/// Text field that tolerates numbers and booleans.
pub fn text<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    match Value::deserialize(de)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!("expected text, got {}", kind(&other)))),
    }
}

/// Optional boolean that also accepts "true"/"false"/"on"/"1" strings.
pub fn opt_flag<'de, D: Deserializer<'de>>(de: D) -> Result<Option<bool>, D::Error> {
    match Value::deserialize(de)? {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(b)),
        Value::Number(n) => Ok(Some(n.as_f64().is_some_and(|v| v != 0.0))),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "on" | "yes" | "1" => Ok(Some(true)),
            "false" | "off" | "no" | "0" => Ok(Some(false)),
            other => Err(D::Error::custom(format!("`{other}` is not a boolean"))),
        },
        other => Err(D::Error::custom(format!("expected a boolean, got {}", kind(&other)))),
    }
}

pub(crate) fn parse_number(raw: &str) -> Result<f64, String> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
    let value = cleaned.parse::<f64>().map_err(|_| format!("`{raw}` is not a number"))?;
    if value.is_finite() { Ok(value) } else { Err(format!("`{raw}` is not a finite number")) }
}

fn to_count(value: f64) -> Result<u32, String> {
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(format!("`{value}` is not a whole, non-negative number"));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(value as u32)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "lenient_test.rs"]
mod tests;
