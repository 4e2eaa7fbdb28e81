use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use futures_util::{SinkExt, StreamExt};
use serde_json::{Map, Value};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("timed out waiting for websocket frame")]
    Timeout,
    #[error("server returned HTTP {status} ({code}): {message}")]
    ServerError { status: u16, code: String, message: String },
    #[error("invalid --arg `{0}`; expected key=value")]
    InvalidArg(String),
    #[error("--data must be a JSON object")]
    DataNotObject,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "toolshelf", about = "Toolshelf widget server CLI")]
struct Cli {
    #[arg(long, env = "TOOLSHELF_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// List tools, optionally searching or filtering by category.
    List {
        #[arg(long, short)]
        query: Option<String>,
        #[arg(long, short)]
        category: Option<String>,
    },
    /// Show one tool's catalog entry.
    Show { id: String },
    /// Run a tool and print its result.
    Run {
        id: String,
        /// JSON object used as the request body.
        #[arg(long)]
        data: Option<String>,
        /// Extra `key=value` fields; values that parse as JSON are sent typed.
        #[arg(long = "arg", short)]
        args: Vec<String>,
    },
    /// Download a QR code or barcode as SVG.
    Svg {
        kind: SvgKind,
        #[arg(long)]
        text: String,
        /// QR error correction level (L, M, Q, H).
        #[arg(long)]
        ecc: Option<String>,
        /// Write to this file instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Stream the world clock, or a countdown with `--until`.
    Clock {
        /// Comma-separated IANA zones.
        #[arg(long)]
        zones: Option<String>,
        /// RFC 3339 instant to count down to.
        #[arg(long)]
        until: Option<String>,
        /// Stop after this many frames.
        #[arg(long)]
        ticks: Option<usize>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum SvgKind {
    Qr,
    Barcode,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let base_url = cli.base_url.trim_end_matches('/').to_owned();

    match cli.command {
        Command::Ping => run_ping(&base_url).await,
        Command::List { query, category } => {
            let mut params = Vec::new();
            if let Some(q) = query.as_deref() {
                params.push(("q", q));
            }
            if let Some(c) = category.as_deref() {
                params.push(("category", c));
            }
            let json = api_request(&base_url, reqwest::Method::GET, "/api/tools", &params, None).await?;
            print_json(&json)
        }
        Command::Show { id } => {
            let path = format!("/api/tools/{id}");
            let json = api_request(&base_url, reqwest::Method::GET, &path, &[], None).await?;
            print_json(&json)
        }
        Command::Run { id, data, args } => {
            let body = build_body(data.as_deref(), &args)?;
            let path = format!("/api/tools/{id}");
            let json = api_request(&base_url, reqwest::Method::POST, &path, &[], Some(body)).await?;
            print_json(json.get("result").unwrap_or(&json))
        }
        Command::Svg { kind, text, ecc, output } => run_svg(&base_url, kind, &text, ecc.as_deref(), output).await,
        Command::Clock { zones, until, ticks } => {
            run_clock(&base_url, zones.as_deref(), until.as_deref(), ticks).await
        }
    }
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let response = client.get(format!("{base_url}/healthz")).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError {
            status: status.as_u16(),
            code: "unhealthy".to_owned(),
            message: "health check failed".to_owned(),
        });
    }
    println!("ok");
    Ok(())
}

async fn run_svg(
    base_url: &str,
    kind: SvgKind,
    text: &str,
    ecc: Option<&str>,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let path = match kind {
        SvgKind::Qr => "/api/tools/qr_code/svg",
        SvgKind::Barcode => "/api/tools/barcode/svg",
    };
    let mut params = vec![("text", text)];
    if let (SvgKind::Qr, Some(ecc)) = (kind, ecc) {
        params.push(("ecc", ecc));
    }

    let response = reqwest::Client::new().get(format!("{base_url}{path}")).query(&params).send().await?;
    let status = response.status();
    if !status.is_success() {
        let value = response.json::<Value>().await.unwrap_or(Value::Null);
        return Err(server_error(status.as_u16(), &value));
    }
    let svg = response.bytes().await?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, &svg).await?;
            eprintln!("wrote {} bytes to {}", svg.len(), path.display());
        }
        None => println!("{}", String::from_utf8_lossy(&svg)),
    }
    Ok(())
}

async fn run_clock(
    base_url: &str,
    zones: Option<&str>,
    until: Option<&str>,
    ticks: Option<usize>,
) -> Result<(), CliError> {
    let url = clock_url(base_url, zones, until)?;
    let (mut stream, _) = connect_async(url.as_str())
        .await
        .map_err(|error| CliError::WsConnect(Box::new(error)))?;

    let mut received = 0;
    while ticks.is_none_or(|limit| received < limit) {
        let Some(text) = recv_text(&mut stream, Duration::from_secs(5)).await? else {
            return Ok(());
        };
        println!("{text}");
        received += 1;
    }

    let _ = stream.send(Message::Close(None)).await;
    Ok(())
}

async fn recv_text(
    stream: &mut tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
    timeout: Duration,
) -> Result<Option<String>, CliError> {
    let fut = async {
        loop {
            let Some(message) = stream.next().await else {
                return Ok(None);
            };
            match message.map_err(|error| CliError::WsConnect(Box::new(error)))? {
                Message::Text(text) => return Ok(Some(text.to_string())),
                Message::Close(_) => return Ok(None),
                _ => {}
            }
        }
    };

    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| CliError::Timeout)?
}

async fn api_request(
    base_url: &str,
    method: reqwest::Method,
    path: &str,
    query: &[(&str, &str)],
    body: Option<Value>,
) -> Result<Value, CliError> {
    let client = reqwest::Client::new();
    let request = client.request(method, format!("{base_url}{path}")).query(query);
    let request = if let Some(json) = body {
        request.json(&json)
    } else {
        request
    };

    let response = request.send().await?;
    let status = response.status();
    let value = response
        .json::<Value>()
        .await
        .unwrap_or_else(|_| Value::Null);

    if !status.is_success() {
        return Err(server_error(status.as_u16(), &value));
    }

    Ok(value)
}

/// Build an error from the server's `{ "error": { "code", "message" } }` body.
fn server_error(status: u16, body: &Value) -> CliError {
    let field = |name: &str| {
        body.pointer(&format!("/error/{name}"))
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
    };
    CliError::ServerError {
        status,
        code: field("code").unwrap_or_else(|| "unknown".to_owned()),
        message: field("message").unwrap_or_else(|| body.to_string()),
    }
}

/// Merge `--data` and `--arg key=value` pairs into one request body.
fn build_body(data: Option<&str>, args: &[String]) -> Result<Value, CliError> {
    let mut body = match data {
        Some(raw) => match serde_json::from_str::<Value>(raw)? {
            Value::Object(map) => map,
            _ => return Err(CliError::DataNotObject),
        },
        None => Map::new(),
    };

    for arg in args {
        let Some((key, raw)) = arg.split_once('=') else {
            return Err(CliError::InvalidArg(arg.clone()));
        };
        if key.trim().is_empty() {
            return Err(CliError::InvalidArg(arg.clone()));
        }
        body.insert(key.trim().to_owned(), parse_arg_value(raw));
    }
    Ok(Value::Object(body))
}

/// JSON literals are sent typed; anything else is sent as a string.
fn parse_arg_value(raw: &str) -> Value {
    serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

fn clock_url(base_url: &str, zones: Option<&str>, until: Option<&str>) -> Result<String, CliError> {
    let ws_base = if let Some(rest) = base_url.strip_prefix("http://") {
        format!("ws://{rest}")
    } else if let Some(rest) = base_url.strip_prefix("https://") {
        format!("wss://{rest}")
    } else {
        return Err(CliError::InvalidBaseUrl(base_url.to_owned()));
    };

    let mut params = Vec::new();
    if let Some(zones) = zones {
        params.push(format!("zones={}", zones.replace(' ', "")));
    }
    if let Some(until) = until {
        params.push(format!("until={}", until.replace('+', "%2B")));
    }
    if params.is_empty() {
        Ok(format!("{ws_base}/api/clock/ws"))
    } else {
        Ok(format!("{ws_base}/api/clock/ws?{}", params.join("&")))
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
