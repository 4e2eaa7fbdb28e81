use chrono::TimeZone;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;

use super::*;
use crate::config::ServerConfig;
use crate::routes::app;
use crate::state::test_helpers;

fn query(zones: Option<&str>, until: Option<&str>) -> ClockQuery {
    ClockQuery { zones: zones.map(str::to_owned), until: until.map(str::to_owned) }
}

#[test]
fn parse_mode_defaults_to_world_clock() {
    let ClockMode::Zones(zones) = parse_mode(&query(None, None)).unwrap() else {
        panic!("expected zones mode");
    };
    assert!(!zones.is_empty());
}

#[test]
fn parse_mode_splits_zone_list() {
    let ClockMode::Zones(zones) = parse_mode(&query(Some("Asia/Tokyo, Europe/Paris"), None)).unwrap() else {
        panic!("expected zones mode");
    };
    assert_eq!(zones, vec![chrono_tz::Asia::Tokyo, chrono_tz::Europe::Paris]);
}

#[test]
fn parse_mode_rejects_bad_input() {
    let err = parse_mode(&query(Some("Mars/Olympus"), None)).unwrap_err();
    assert_eq!(err.code, "invalid_input");

    let err = parse_mode(&query(None, Some("next tuesday"))).unwrap_err();
    assert_eq!(err.code, "invalid_input");
}

#[test]
fn tick_frame_is_tagged() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let frames = ClockMode::Zones(vec![chrono_tz::UTC]).frames_at(now);
    let json = serde_json::to_value(&frames[0]).unwrap();
    assert_eq!(json["kind"], "tick");
    assert_eq!(json["utc"], "2024-06-01T12:00:00Z");
    assert_eq!(json["zones"].as_array().unwrap().len(), 1);
}

#[test]
fn countdown_ends_with_done() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let until = Utc.with_ymd_and_hms(2024, 6, 2, 13, 1, 5).unwrap();

    let running = ClockMode::Until(until).frames_at(now);
    assert_eq!(running.len(), 1);
    let ClockFrame::Countdown(left) = &running[0] else {
        panic!("expected countdown frame");
    };
    assert_eq!((left.days, left.hours, left.minutes, left.seconds), (1, 1, 1, 5));

    let finished = ClockMode::Until(until).frames_at(until);
    assert_eq!(finished.len(), 2);
    assert!(matches!(&finished[1], ClockFrame::Done { .. }));
    assert_eq!(serde_json::to_value(&finished[1]).unwrap()["kind"], "done");
}

async fn spawn_server(config: ServerConfig) -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app(test_helpers::test_app_state_with_config(config));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn next_json(
    stream: &mut tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>,
) -> Option<Value> {
    loop {
        let msg = timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("clock frame timed out")?
            .ok()?;
        match msg {
            WsMessage::Text(text) => return Some(serde_json::from_str(&text).unwrap()),
            WsMessage::Close(_) => return None,
            _ => {}
        }
    }
}

#[tokio::test]
async fn expired_countdown_sends_done_and_closes() {
    let addr = spawn_server(ServerConfig::default()).await;
    let url = format!("ws://{addr}/api/clock/ws?until=2000-01-01T00:00:00Z");
    let (mut stream, _) = connect_async(url).await.unwrap();

    let first = next_json(&mut stream).await.unwrap();
    assert_eq!(first["kind"], "countdown");
    assert_eq!(first["done"], true);
    assert_eq!(first["total_seconds"], 0);

    let second = next_json(&mut stream).await.unwrap();
    assert_eq!(second["kind"], "done");

    assert!(next_json(&mut stream).await.is_none());
}

#[tokio::test]
async fn world_clock_stream_stops_at_tick_cap() {
    let config = ServerConfig { clock_max_ticks: 1, ..ServerConfig::default() };
    let addr = spawn_server(config).await;
    let url = format!("ws://{addr}/api/clock/ws?zones=UTC");
    let (mut stream, _) = connect_async(url).await.unwrap();

    let tick = next_json(&mut stream).await.unwrap();
    assert_eq!(tick["kind"], "tick");
    assert_eq!(tick["zones"].as_array().unwrap().len(), 1);

    assert!(next_json(&mut stream).await.is_none());
}

#[tokio::test]
async fn client_close_stops_the_stream() {
    let addr = spawn_server(ServerConfig::default()).await;
    let url = format!("ws://{addr}/api/clock/ws?zones=UTC");
    let (mut stream, _) = connect_async(url).await.unwrap();

    let tick = next_json(&mut stream).await.unwrap();
    assert_eq!(tick["kind"], "tick");

    stream.send(WsMessage::Close(None)).await.unwrap();

    // A running timer would push another tick within a second.
    let started = std::time::Instant::now();
    assert!(next_json(&mut stream).await.is_none());
    assert!(started.elapsed() < TICK);
}
