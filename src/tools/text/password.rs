//! Random password generator.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::tools::{ToolError, lenient, round_to};

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?/~";
/// Characters easily confused with one another in most fonts.
const AMBIGUOUS: &str = "Il1O0o";

pub const MIN_LENGTH: u32 = 4;
pub const MAX_LENGTH: u32 = 256;
pub const MAX_COUNT: u32 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct PasswordRequest {
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub length: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    pub lowercase: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    pub uppercase: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    pub digits: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    pub symbols: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    pub exclude_ambiguous: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Weak,
    Fair,
    Strong,
    VeryStrong,
}

impl Strength {
    #[must_use]
    pub fn from_entropy(bits: f64) -> Self {
        match bits {
            b if b < 40.0 => Self::Weak,
            b if b < 60.0 => Self::Fair,
            b if b < 80.0 => Self::Strong,
            _ => Self::VeryStrong,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PasswordResponse {
    pub passwords: Vec<String>,
    pub pool_size: usize,
    pub entropy_bits: f64,
    pub strength: Strength,
}

pub fn generate(req: PasswordRequest) -> Result<PasswordResponse, ToolError> {
    let length = req.length.unwrap_or(16);
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Err(ToolError::invalid("length", format!("must be between {MIN_LENGTH} and {MAX_LENGTH}")));
    }
    let count = req.count.unwrap_or(1);
    if !(1..=MAX_COUNT).contains(&count) {
        return Err(ToolError::invalid("count", format!("must be between 1 and {MAX_COUNT}")));
    }

    let exclude_ambiguous = req.exclude_ambiguous.unwrap_or(false);
    let classes: Vec<Vec<char>> = [
        (req.lowercase.unwrap_or(true), LOWERCASE),
        (req.uppercase.unwrap_or(true), UPPERCASE),
        (req.digits.unwrap_or(true), DIGITS),
        (req.symbols.unwrap_or(true), SYMBOLS),
    ]
    .into_iter()
    .filter(|(enabled, _)| *enabled)
    .map(|(_, set)| set.chars().filter(|c| !exclude_ambiguous || !AMBIGUOUS.contains(*c)).collect())
    .collect();

    if classes.is_empty() {
        return Err(ToolError::invalid("lowercase", "enable at least one character class"));
    }

    let pool: Vec<char> = classes.iter().flatten().copied().collect();
    let mut rng = rand::rng();
    let passwords = (0..count).map(|_| build_one(&mut rng, &classes, &pool, length as usize)).collect();

    #[allow(clippy::cast_precision_loss)]
    let entropy_bits = round_to(f64::from(length) * (pool.len() as f64).log2(), 1);
    Ok(PasswordResponse { passwords, pool_size: pool.len(), entropy_bits, strength: Strength::from_entropy(entropy_bits) })
}

/// One character from every class, the rest from the combined pool, shuffled.
fn build_one<R: Rng>(rng: &mut R, classes: &[Vec<char>], pool: &[char], length: usize) -> String {
    let mut chars: Vec<char> = classes.iter().map(|class| class[rng.random_range(0..class.len())]).collect();
    while chars.len() < length {
        chars.push(pool[rng.random_range(0..pool.len())]);
    }
    chars.shuffle(rng);
    chars.into_iter().collect()
}

#[cfg(test)]
#[path = "password_test.rs"]
mod tests;
