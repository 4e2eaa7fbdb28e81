//! Age and countdown calculators.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::tools::ToolError;

const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// AGE
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct AgeRequest {
    pub birth_date: String,
    /// Defaults to today (UTC).
    #[serde(default)]
    pub on_date: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AgeResponse {
    pub years: i32,
    pub months: u32,
    pub days: u32,
    pub total_days: i64,
    pub total_weeks: i64,
    pub born_on: String,
    pub next_birthday: String,
    pub days_until_birthday: i64,
}

pub fn age(req: AgeRequest, today: NaiveDate) -> Result<AgeResponse, ToolError> {
    let birth = parse_date("birth_date", &req.birth_date)?;
    let on = match req.on_date.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => parse_date("on_date", raw)?,
        None => today,
    };
    if birth > on {
        return Err(ToolError::invalid("birth_date", "must not be after the reference date"));
    }

    let (years, months, days) = calendar_difference(birth, on)?;
    let total_days = (on - birth).num_days();

    let mut next = birthday_in(birth, on.year())?;
    if next < on {
        next = birthday_in(birth, on.year() + 1)?;
    }

    Ok(AgeResponse {
        years,
        months,
        days,
        total_days,
        total_weeks: total_days / 7,
        born_on: birth.format("%A").to_string(),
        next_birthday: next.format(DATE_FORMAT).to_string(),
        days_until_birthday: (next - on).num_days(),
    })
}

fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, ToolError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| ToolError::invalid(field, format!("expected YYYY-MM-DD ({e})")))
}

/// Whole years, months and days from `from` to `to` (`from <= to`).
///
/// Months are counted to the latest monthly anniversary not after `to`;
/// an anniversary past the end of a short month falls on its last day, so
/// Feb 29 lands on Feb 28 in common years.
fn calendar_difference(from: NaiveDate, to: NaiveDate) -> Result<(i32, u32, u32), ToolError> {
    let overflow = || ToolError::invalid("birth_date", "date arithmetic overflow");
    let span = (i64::from(to.year()) - i64::from(from.year())) * 12 + i64::from(to.month()) - i64::from(from.month());
    let mut months = u32::try_from(span).map_err(|_| overflow())?;

    let mut anniversary = from.checked_add_months(Months::new(months)).ok_or_else(overflow)?;
    if anniversary > to {
        months = months.checked_sub(1).ok_or_else(overflow)?;
        anniversary = from.checked_add_months(Months::new(months)).ok_or_else(overflow)?;
    }

    let days = u32::try_from((to - anniversary).num_days()).map_err(|_| overflow())?;
    let years = i32::try_from(months / 12).map_err(|_| overflow())?;
    Ok((years, months % 12, days))
}

/// The birthday's calendar date in `year`; Feb 29 falls on Feb 28 in common
/// years.
fn birthday_in(birth: NaiveDate, year: i32) -> Result<NaiveDate, ToolError> {
    NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .ok_or_else(|| ToolError::invalid("birth_date", "date out of range"))
}

// =============================================================================
// COUNTDOWN
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CountdownRequest {
    /// RFC 3339 instant, e.g. `2026-12-31T23:59:59Z`.
    pub until: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Countdown {
    pub until: String,
    pub done: bool,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_seconds: i64,
}

pub fn countdown(req: CountdownRequest, now: DateTime<Utc>) -> Result<Countdown, ToolError> {
    let until = parse_instant(&req.until)?;
    Ok(remaining(until, now))
}

/// Parse an RFC 3339 instant into UTC.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, ToolError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ToolError::invalid("until", format!("expected an RFC 3339 timestamp ({e})")))
}

/// Time left until `until`, clamped at zero.
#[must_use]
pub fn remaining(until: DateTime<Utc>, now: DateTime<Utc>) -> Countdown {
    let total = (until - now).num_seconds().max(0);
    Countdown {
        until: until.to_rfc3339(),
        done: total == 0,
        days: total / 86_400,
        hours: total % 86_400 / 3600,
        minutes: total % 3600 / 60,
        seconds: total % 60,
        total_seconds: total,
    }
}

#[cfg(test)]
#[path = "dates_test.rs"]
mod tests;
