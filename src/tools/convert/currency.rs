//! Currency conversion against a rate table.
//!
//! The built-in table is a static snapshot quoted against USD. Deployments
//! can replace it at startup with a JSON file of the same shape:
//!
//! ```json
//! { "base": "USD", "as_of": "2025-01-01", "rates": { "EUR": 0.92, "JPY": 151.3 } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tools::{ToolError, cents, lenient, require_non_negative, round_to};

const BUILTIN_AS_OF: &str = "static snapshot";

/// Units of each currency per one USD.
const BUILTIN_RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("JPY", 151.3),
    ("CNY", 7.24),
    ("INR", 83.4),
    ("CAD", 1.36),
    ("AUD", 1.52),
    ("NZD", 1.66),
    ("CHF", 0.90),
    ("SEK", 10.6),
    ("NOK", 10.7),
    ("DKK", 6.87),
    ("PLN", 3.98),
    ("CZK", 23.2),
    ("HUF", 362.0),
    ("RUB", 92.5),
    ("TRY", 32.3),
    ("ZAR", 18.6),
    ("BRL", 5.05),
    ("MXN", 16.8),
    ("ARS", 870.0),
    ("CLP", 950.0),
    ("KRW", 1350.0),
    ("SGD", 1.35),
    ("HKD", 7.82),
    ("TWD", 32.0),
    ("THB", 36.5),
    ("IDR", 15_900.0),
    ("MYR", 4.72),
    ("PHP", 56.5),
    ("VND", 24_800.0),
    ("AED", 3.6725),
    ("SAR", 3.75),
    ("ILS", 3.7),
    ("EGP", 47.5),
    ("NGN", 1_300.0),
];

#[derive(Debug, thiserror::Error)]
pub enum RatesError {
    #[error("failed to read rates file {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("invalid rates JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid rate for {code}: {reason}")]
    InvalidRate { code: String, reason: &'static str },
}

#[derive(Debug, Deserialize)]
struct RatesFile {
    base: String,
    #[serde(default)]
    as_of: Option<String>,
    rates: BTreeMap<String, f64>,
}

/// Rates keyed by upper-case ISO 4217 code, quoted per one unit of `base`.
#[derive(Debug, Clone)]
pub struct CurrencyRates {
    base: String,
    as_of: String,
    rates: BTreeMap<String, f64>,
}

impl Default for CurrencyRates {
    fn default() -> Self {
        Self {
            base: "USD".into(),
            as_of: BUILTIN_AS_OF.into(),
            rates: BUILTIN_RATES.iter().map(|(code, rate)| ((*code).to_owned(), *rate)).collect(),
        }
    }
}

impl CurrencyRates {
    /// Parse a rates document. The base currency is added at 1.0 if missing.
    ///
    /// # Errors
    ///
    /// Returns [`RatesError`] for malformed JSON or non-positive rates.
    pub fn from_json(raw: &str) -> Result<Self, RatesError> {
        let file: RatesFile = serde_json::from_str(raw)?;
        let base = file.base.trim().to_ascii_uppercase();
        let mut rates = BTreeMap::new();
        for (code, rate) in file.rates {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(RatesError::InvalidRate { code, reason: "must be a positive number" });
            }
            rates.insert(code.trim().to_ascii_uppercase(), rate);
        }
        match rates.get(&base) {
            Some(rate) if (rate - 1.0).abs() > 1e-12 => {
                return Err(RatesError::InvalidRate { code: base, reason: "base currency must have rate 1.0" });
            }
            Some(_) => {}
            None => {
                rates.insert(base.clone(), 1.0);
            }
        }
        Ok(Self { base, as_of: file.as_of.unwrap_or_else(|| "unspecified".into()), rates })
    }

    /// Load a rates document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`RatesError::Read`] if the file cannot be read, otherwise as
    /// [`CurrencyRates::from_json`].
    pub fn load(path: &Path) -> Result<Self, RatesError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| RatesError::Read { path: path.display().to_string(), source })?;
        Self::from_json(&raw)
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    fn rate(&self, field: &'static str, code: &str) -> Result<(String, f64), ToolError> {
        let code = code.trim().to_ascii_uppercase();
        match self.rates.get(&code) {
            Some(rate) => Ok((code, *rate)),
            None => Err(ToolError::invalid(field, format!("unsupported currency code `{code}`"))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CurrencyRequest {
    #[serde(deserialize_with = "lenient::number")]
    pub amount: f64,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct CurrencyResponse {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub result: f64,
    pub rate: f64,
    pub inverse_rate: f64,
    pub as_of: String,
    pub supported: Vec<String>,
}

pub fn convert(rates: &CurrencyRates, req: CurrencyRequest) -> Result<CurrencyResponse, ToolError> {
    let amount = require_non_negative("amount", req.amount)?;
    let (from, from_rate) = rates.rate("from", &req.from)?;
    let (to, to_rate) = rates.rate("to", &req.to)?;

    let rate = to_rate / from_rate;
    Ok(CurrencyResponse {
        amount,
        from,
        to,
        result: cents(amount * rate),
        rate: round_to(rate, 6),
        inverse_rate: round_to(1.0 / rate, 6),
        as_of: rates.as_of.clone(),
        supported: rates.rates.keys().cloned().collect(),
    })
}

#[cfg(test)]
#[path = "currency_test.rs"]
mod tests;
