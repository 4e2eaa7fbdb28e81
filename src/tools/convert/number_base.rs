//! Integer conversion between bases 2 through 36.

use serde::{Deserialize, Serialize};

use crate::tools::{ToolError, lenient};

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Deserialize)]
pub struct NumberBaseRequest {
    #[serde(deserialize_with = "lenient::text")]
    pub value: String,
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub from_base: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub to_base: Option<u32>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NumberBaseResponse {
    pub binary: String,
    pub octal: String,
    pub decimal: String,
    pub hexadecimal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted: Option<String>,
}

pub fn convert(req: NumberBaseRequest) -> Result<NumberBaseResponse, ToolError> {
    let from = req.from_base.map(|b| check_base("from_base", b)).transpose()?;
    let to = req.to_base.map(|b| check_base("to_base", b)).transpose()?;
    let value = parse_in_base(&req.value, from)?;

    Ok(NumberBaseResponse {
        binary: format_in_base(value, 2),
        octal: format_in_base(value, 8),
        decimal: format_in_base(value, 10),
        hexadecimal: format_in_base(value, 16),
        converted: to.map(|radix| format_in_base(value, radix)),
    })
}

fn check_base(field: &'static str, base: u32) -> Result<u32, ToolError> {
    if (2..=36).contains(&base) { Ok(base) } else { Err(ToolError::invalid(field, "base must be between 2 and 36")) }
}

/// Parse a signed integer, tolerating `_`/space separators and a `0b`,
/// `0o` or `0x` prefix. Without an explicit `radix` the prefix picks the
/// base, otherwise decimal. A prefix that names a different base than
/// `radix` is an error, unless its letter is an ordinary digit in `radix`
/// (`0b1` in base 16 is the number 0xb1).
pub fn parse_in_base(raw: &str, radix: Option<u32>) -> Result<i128, ToolError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != '_' && !c.is_whitespace()).collect();
    let (negative, body) = match cleaned.as_bytes().first() {
        Some(b'-') => (true, &cleaned[1..]),
        Some(b'+') => (false, &cleaned[1..]),
        _ => (false, cleaned.as_str()),
    };

    let prefixed = prefix_radix(body).filter(|_| {
        radix.is_none_or(|r| char::from(body.as_bytes()[1]).to_digit(r).is_none())
    });
    let (radix, digits) = match (radix, prefixed) {
        (Some(given), Some(named)) if given != named => {
            return Err(ToolError::invalid(
                "value",
                format!("prefix `{}` means base {named} but from_base is {given}", &body[..2]),
            ));
        }
        (_, Some(named)) => (named, &body[2..]),
        (given, None) => (given.unwrap_or(10), body),
    };
    if digits.is_empty() {
        return Err(ToolError::invalid("value", "no digits"));
    }

    let magnitude = u128::from_str_radix(digits, radix)
        .map_err(|e| ToolError::invalid("value", format!("`{digits}` is not a base-{radix} number ({e})")))?;

    let limit = if negative { i128::MIN.unsigned_abs() } else { i128::MAX.unsigned_abs() };
    if magnitude > limit {
        return Err(ToolError::invalid("value", "out of 128-bit range"));
    }
    #[allow(clippy::cast_possible_wrap)]
    Ok(if negative { (magnitude as i128).wrapping_neg() } else { magnitude as i128 })
}

/// Base named by a leading `0b`, `0o` or `0x`.
fn prefix_radix(body: &str) -> Option<u32> {
    match body.as_bytes() {
        [b'0', b'b' | b'B', ..] => Some(2),
        [b'0', b'o' | b'O', ..] => Some(8),
        [b'0', b'x' | b'X', ..] => Some(16),
        _ => None,
    }
}

/// Render `value` in `radix` with lower-case digits.
#[must_use]
pub fn format_in_base(value: i128, radix: u32) -> String {
    let mut magnitude = value.unsigned_abs();
    if magnitude == 0 {
        return "0".into();
    }
    let radix = u128::from(radix);
    let mut out = Vec::new();
    while magnitude > 0 {
        #[allow(clippy::cast_possible_truncation)]
        out.push(DIGITS[(magnitude % radix) as usize]);
        magnitude /= radix;
    }
    if value < 0 {
        out.push(b'-');
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
#[path = "number_base_test.rs"]
mod tests;
