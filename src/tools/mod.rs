//! Tool dispatch.
//!
//! DESIGN
//! ======
//! Every tool is a pure function from a typed request struct to a typed
//! response struct. `execute` decodes the JSON body into the request type,
//! runs the tool and encodes the response, so the HTTP layer, the clock
//! stream and the tests all go through one entry point.
//!
//! Tools never share state. The only inputs besides the request are the
//! currency rate table and the current time, both carried by `ToolContext`.

pub mod calc;
pub mod convert;
pub mod lenient;
pub mod text;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use convert::currency::CurrencyRates;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
    #[error("malformed request: {0}")]
    Malformed(String),
}

impl ToolError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput { field, reason: reason.into() }
    }

    /// Stable, grepable error code for API responses.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::InvalidInput { .. } => "invalid_input",
            Self::UnknownUnit(_) => "unknown_unit",
            Self::Malformed(_) => "malformed_request",
        }
    }
}

// =============================================================================
// CONTEXT
// =============================================================================

/// Ambient inputs a tool may read besides its request.
pub struct ToolContext<'a> {
    pub rates: &'a CurrencyRates,
    pub now: DateTime<Utc>,
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Run the tool named `id` against a JSON request body.
///
/// # Errors
///
/// Returns [`ToolError::UnknownTool`] for ids the dispatcher does not know,
/// [`ToolError::Malformed`] when the body does not decode into the tool's
/// request type, and whatever validation error the tool itself reports.
pub fn execute(ctx: &ToolContext<'_>, id: &str, input: Value) -> Result<Value, ToolError> {
    use calc::{dates, everyday, finance, grade, health};
    use convert::{color, currency, encoding, number_base, roman, timezone, units};
    use text::{case, codes, diff, email, hash, json, markdown, minify, password, regex_test, slug, words};

    match id {
        // Calculators.
        "bmi" => run(input, health::bmi),
        "mortgage" => run(input, finance::mortgage),
        "loan" => run(input, finance::loan),
        "compound_interest" => run(input, finance::compound_interest),
        "tip" => run(input, everyday::tip),
        "discount" => run(input, everyday::discount),
        "sales_tax" => run(input, everyday::sales_tax),
        "unit_price" => run(input, everyday::unit_price),
        "fuel_cost" => run(input, everyday::fuel_cost),
        "percentage" => run(input, everyday::percentage),
        "grade" => run(input, grade::grade),
        "age" => run(input, |req| dates::age(req, ctx.now.date_naive())),
        "countdown" => run(input, |req| dates::countdown(req, ctx.now)),

        // Converters.
        "length" => run(input, |req| units::convert(&units::LENGTH, req)),
        "weight" => run(input, |req| units::convert(&units::WEIGHT, req)),
        "area" => run(input, |req| units::convert(&units::AREA, req)),
        "volume" => run(input, |req| units::convert(&units::VOLUME, req)),
        "temperature" => run(input, units::temperature),
        "currency" => run(input, |req| currency::convert(ctx.rates, req)),
        "color" => run(input, color::convert),
        "timezone" => run(input, timezone::convert),
        "world_clock" => run(input, |req| timezone::world_clock(req, ctx.now)),
        "number_base" => run(input, number_base::convert),
        "roman" => run(input, roman::convert),
        "base64" => run(input, encoding::base64),
        "url_encode" => run(input, encoding::url),

        // Text and data utilities.
        "json_format" => run(input, json::format),
        "regex_test" => run(input, regex_test::test),
        "hash" => run(input, hash::hash),
        "qr_code" => run(input, codes::qr_code),
        "barcode" => run(input, codes::barcode),
        "password" => run(input, password::generate),
        "markdown" => run(input, markdown::convert),
        "minify" => run(input, minify::minify),
        "diff" => run(input, diff::diff),
        "word_frequency" => run(input, words::word_frequency),
        "case_convert" => run(input, case::convert),
        "slug" => run(input, slug::slug),
        "email_validate" => run(input, email::validate),

        _ => Err(ToolError::UnknownTool(id.to_owned())),
    }
}

/// Decode `input` into the tool's request type, run it, encode the response.
fn run<Req, Resp, F>(input: Value, tool: F) -> Result<Value, ToolError>
where
    Req: DeserializeOwned,
    Resp: Serialize,
    F: FnOnce(Req) -> Result<Resp, ToolError>,
{
    let req = serde_json::from_value::<Req>(input).map_err(|e| ToolError::Malformed(e.to_string()))?;
    let resp = tool(req)?;
    serde_json::to_value(resp).map_err(|e| ToolError::Malformed(format!("response encoding failed: {e}")))
}

// =============================================================================
// SHARED NUMERIC HELPERS
// =============================================================================

/// Reject zero, negative and non-finite values.
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, ToolError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ToolError::invalid(field, "must be greater than zero"))
    }
}

/// Reject negative and non-finite values.
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<f64, ToolError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ToolError::invalid(field, "must not be negative"))
    }
}

/// Round to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}

/// Round money to cents.
pub(crate) fn cents(value: f64) -> f64 {
    round_to(value, 2)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
