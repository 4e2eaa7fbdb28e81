//! Clock websocket: a world clock or a countdown pushed once per second.
//!
//! LIFECYCLE
//! =========
//! 1. Query is validated before the upgrade, so bad zones or a bad `until`
//!    come back as a normal 400 error body.
//! 2. After the upgrade a one-second interval drives `tick` (or `countdown`)
//!    frames until the client closes, the countdown reaches zero, or the
//!    stream hits `clock_max_ticks`.
//! 3. A finished countdown sends `done` and then a close frame.

use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Response;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::tools::ApiError;
use crate::state::AppState;
use crate::tools::calc::dates::{self, Countdown};
use crate::tools::convert::timezone::{self, WorldClock};

const TICK: Duration = Duration::from_secs(1);

// =============================================================================
// FRAMES
// =============================================================================

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClockFrame {
    Tick(WorldClock),
    Countdown(Countdown),
    Done { until: String },
}

/// What one connection streams.
#[derive(Debug, Clone)]
pub enum ClockMode {
    Zones(Vec<Tz>),
    Until(DateTime<Utc>),
}

impl ClockMode {
    /// Frames to send at `now`. A countdown that has reached zero yields its
    /// last reading followed by `done`.
    #[must_use]
    pub fn frames_at(&self, now: DateTime<Utc>) -> Vec<ClockFrame> {
        match self {
            Self::Zones(zones) => vec![ClockFrame::Tick(timezone::clock_at(zones, now))],
            Self::Until(until) => {
                let left = dates::remaining(*until, now);
                if left.done {
                    let until = left.until.clone();
                    vec![ClockFrame::Countdown(left), ClockFrame::Done { until }]
                } else {
                    vec![ClockFrame::Countdown(left)]
                }
            }
        }
    }
}

// =============================================================================
// UPGRADE
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ClockQuery {
    /// Comma-separated IANA zone names.
    pub zones: Option<String>,
    /// RFC 3339 instant; switches the stream to countdown mode.
    pub until: Option<String>,
}

/// Resolve the query into a stream mode.
///
/// # Errors
///
/// Returns the tool error for an unknown zone or an unparsable `until`.
pub fn parse_mode(query: &ClockQuery) -> Result<ClockMode, ApiError> {
    if let Some(until) = query.until.as_deref().filter(|u| !u.trim().is_empty()) {
        return Ok(ClockMode::Until(dates::parse_instant(until)?));
    }
    let requested: Vec<String> = query
        .zones
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(|zone| zone.trim().to_owned())
        .collect();
    Ok(ClockMode::Zones(timezone::resolve_zones(&requested)?))
}

pub async fn handle_clock_ws(
    State(state): State<AppState>,
    query: Result<Query<ClockQuery>, QueryRejection>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let mode = parse_mode(&query)?;
    let max_ticks = state.config.clock_max_ticks;
    Ok(ws.on_upgrade(move |socket| run_clock(socket, mode, max_ticks)))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_clock(mut socket: WebSocket, mode: ClockMode, max_ticks: u32) {
    info!(?mode, "clock stream opened");
    let mut ticker = tokio::time::interval(TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut sent: u32 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let frames = mode.frames_at(Utc::now());
                let finished = frames.iter().any(|f| matches!(f, ClockFrame::Done { .. }));
                for frame in &frames {
                    if !send_frame(&mut socket, frame).await {
                        return;
                    }
                }
                sent += 1;
                if finished || sent >= max_ticks {
                    let _ = socket.send(Message::Close(None)).await;
                    break;
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        debug!(error = %e, "clock socket receive failed");
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    info!(ticks = sent, "clock stream closed");
}

async fn send_frame(socket: &mut WebSocket, frame: &ClockFrame) -> bool {
    let json = match serde_json::to_string(frame) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "failed to serialize clock frame");
            return false;
        }
    };
    if let Err(e) = socket.send(Message::Text(json.into())).await {
        debug!(error = %e, "clock socket send failed");
        return false;
    }
    true
}

#[cfg(test)]
#[path = "clock_test.rs"]
mod tests;
