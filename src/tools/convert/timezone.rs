//! Time zone conversion and world clock.
//!
//! Zones are IANA names resolved through `chrono-tz`, so daylight saving
//! transitions are honoured. Ambiguous wall-clock times (the repeated hour
//! when clocks fall back) resolve to the earlier instant; skipped times
//! (when clocks spring forward) are rejected.

use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::tools::ToolError;

const INPUT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub const DEFAULT_CLOCK_ZONES: &[&str] = &["UTC", "America/New_York", "Europe/London", "Asia/Tokyo"];

/// Resolve an IANA zone name.
pub fn parse_zone(field: &'static str, raw: &str) -> Result<Tz, ToolError> {
    raw.trim()
        .parse::<Tz>()
        .map_err(|_| ToolError::invalid(field, format!("unknown time zone `{}`", raw.trim())))
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ZonedTime {
    pub zone: String,
    pub datetime: String,
    pub utc_offset: String,
    pub abbreviation: String,
}

fn describe(dt: &DateTime<Tz>) -> ZonedTime {
    ZonedTime {
        zone: dt.timezone().name().to_owned(),
        datetime: dt.format(OUTPUT_FORMAT).to_string(),
        utc_offset: dt.format("%:z").to_string(),
        abbreviation: dt.format("%Z").to_string(),
    }
}

// =============================================================================
// CONVERSION
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct TimezoneRequest {
    /// Wall-clock time in `from`, `YYYY-MM-DDTHH:MM[:SS]`.
    pub datetime: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct TimezoneResponse {
    pub from: ZonedTime,
    pub to: ZonedTime,
    pub utc: String,
    /// Hours `to` is ahead of `from` at this instant.
    pub hour_difference: f64,
}

pub fn convert(req: TimezoneRequest) -> Result<TimezoneResponse, ToolError> {
    let from_zone = parse_zone("from", &req.from)?;
    let to_zone = parse_zone("to", &req.to)?;
    let naive = parse_wall_clock(&req.datetime)?;

    let local = match from_zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, _) => earlier,
        LocalResult::None => {
            return Err(ToolError::invalid("datetime", format!("{naive} does not exist in {from_zone} (clock change)")));
        }
    };
    let converted = local.with_timezone(&to_zone);

    let from_secs = local.offset().fix().local_minus_utc();
    let to_secs = converted.offset().fix().local_minus_utc();

    Ok(TimezoneResponse {
        from: describe(&local),
        to: describe(&converted),
        utc: local.with_timezone(&Utc).format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        hour_difference: f64::from(to_secs - from_secs) / 3600.0,
    })
}

fn parse_wall_clock(raw: &str) -> Result<NaiveDateTime, ToolError> {
    let trimmed = raw.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ToolError::invalid("datetime", "expected YYYY-MM-DDTHH:MM[:SS]"))
}

// =============================================================================
// WORLD CLOCK
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct WorldClockRequest {
    #[serde(default)]
    pub zones: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WorldClock {
    pub utc: String,
    pub zones: Vec<ZonedTime>,
}

pub fn world_clock(req: WorldClockRequest, now: DateTime<Utc>) -> Result<WorldClock, ToolError> {
    let zones = resolve_zones(&req.zones)?;
    Ok(clock_at(&zones, now))
}

/// Resolve requested zones, falling back to the default set when empty.
pub fn resolve_zones(requested: &[String]) -> Result<Vec<Tz>, ToolError> {
    let names: Vec<&str> = if requested.iter().all(|z| z.trim().is_empty()) {
        DEFAULT_CLOCK_ZONES.to_vec()
    } else {
        requested.iter().map(String::as_str).filter(|z| !z.trim().is_empty()).collect()
    };
    names.into_iter().map(|name| parse_zone("zones", name)).collect()
}

/// One clock reading across `zones`.
#[must_use]
pub fn clock_at(zones: &[Tz], now: DateTime<Utc>) -> WorldClock {
    WorldClock {
        utc: now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        zones: zones.iter().map(|tz| describe(&now.with_timezone(tz))).collect(),
    }
}

#[cfg(test)]
#[path = "timezone_test.rs"]
mod tests;
