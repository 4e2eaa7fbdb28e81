//! Roman numerals, 1 through 3999.

use serde::{Deserialize, Serialize};

use crate::tools::{ToolError, lenient};

const NUMERALS: &[(u32, &str)] = &[
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

pub const MAX: u32 = 3999;

#[derive(Debug, Deserialize)]
pub struct RomanRequest {
    /// Either a decimal number or a numeral string.
    #[serde(deserialize_with = "lenient::text")]
    pub value: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RomanResponse {
    pub number: u32,
    pub roman: String,
    /// `to_roman` when the input was a number, `to_number` otherwise.
    pub direction: &'static str,
}

pub fn convert(req: RomanRequest) -> Result<RomanResponse, ToolError> {
    let input = req.value.trim();
    if input.is_empty() {
        return Err(ToolError::invalid("value", "enter a number or a Roman numeral"));
    }

    if input.chars().all(|c| c.is_ascii_digit()) {
        let number = input
            .parse::<u32>()
            .map_err(|_| ToolError::invalid("value", format!("must be between 1 and {MAX}")))?;
        let roman = to_roman(number)?;
        Ok(RomanResponse { number, roman, direction: "to_roman" })
    } else {
        let roman = input.to_ascii_uppercase();
        let number = from_roman(&roman)?;
        Ok(RomanResponse { number, roman, direction: "to_number" })
    }
}

pub fn to_roman(number: u32) -> Result<String, ToolError> {
    if !(1..=MAX).contains(&number) {
        return Err(ToolError::invalid("value", format!("must be between 1 and {MAX}")));
    }
    let mut rest = number;
    let mut out = String::new();
    for &(value, symbol) in NUMERALS {
        while rest >= value {
            out.push_str(symbol);
            rest -= value;
        }
    }
    Ok(out)
}

/// Parse canonical numerals (case-insensitive). Non-canonical spellings such
/// as `IIII` or `IC` are rejected.
pub fn from_roman(raw: &str) -> Result<u32, ToolError> {
    let upper = raw.trim().to_ascii_uppercase();
    let mut total = 0u32;
    let mut prev = 0u32;
    for c in upper.chars().rev() {
        let value = match c {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            other => return Err(ToolError::invalid("value", format!("`{other}` is not a Roman numeral"))),
        };
        if value < prev {
            total = total.saturating_sub(value);
        } else {
            total = total.saturating_add(value);
            prev = value;
        }
    }

    if total == 0 || total > MAX || to_roman(total)? != upper {
        return Err(ToolError::invalid("value", format!("`{upper}` is not a valid Roman numeral")));
    }
    Ok(total)
}

#[cfg(test)]
#[path = "roman_test.rs"]
mod tests;
