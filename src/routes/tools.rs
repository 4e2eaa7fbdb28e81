//! Catalog and tool execution routes.
//!
//! DESIGN
//! ======
//! Tool bodies are read as raw bytes and decoded here so an empty body can
//! mean "all defaults" and every decoding failure shares one error shape:
//! `{ "error": { "code", "message" } }`. Tools run on the blocking pool
//! because a few of them (diff, regex, hashing) scale with input size.

use std::time::Instant;

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error, info};

use crate::catalog::{self, Category, ToolDescriptor};
use crate::state::AppState;
use crate::tools::text::codes::{self, BarcodeRequest, QrRequest};
use crate::tools::{ToolError, execute};

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal",
            message: "tool execution failed".into(),
        }
    }
}

pub(crate) fn tool_error_to_status(err: &ToolError) -> StatusCode {
    match err {
        ToolError::UnknownTool(_) => StatusCode::NOT_FOUND,
        ToolError::InvalidInput { .. } | ToolError::UnknownUnit(_) | ToolError::Malformed(_) => {
            StatusCode::BAD_REQUEST
        }
    }
}

impl From<ToolError> for ApiError {
    fn from(err: ToolError) -> Self {
        Self { status: tool_error_to_status(&err), code: err.code(), message: err.to_string() }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        let status = rejection.status();
        let code = if status == StatusCode::PAYLOAD_TOO_LARGE { "payload_too_large" } else { "malformed_request" };
        Self { status, code, message: rejection.body_text() }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self { status: StatusCode::BAD_REQUEST, code: "invalid_input", message: rejection.body_text() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "error": { "code": self.code, "message": self.message } });
        (self.status, Json(body)).into_response()
    }
}

// =============================================================================
// CATALOG
// =============================================================================

#[derive(Debug, Serialize)]
pub struct CategorySummary {
    #[serde(flatten)]
    pub category: Category,
    pub tools: Vec<&'static str>,
}

pub async fn list_categories() -> Json<Vec<CategorySummary>> {
    let summaries = catalog::categories()
        .iter()
        .map(|category| CategorySummary {
            category: *category,
            tools: catalog::in_category(category.id).iter().map(|tool| tool.id).collect(),
        })
        .collect();
    Json(summaries)
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolsQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

pub async fn list_tools(
    query: Result<Query<ToolsQuery>, QueryRejection>,
) -> Result<Json<Vec<ToolDescriptor>>, ApiError> {
    let Query(query) = query?;
    let mut found: Vec<&ToolDescriptor> = match query.q.as_deref() {
        Some(q) => catalog::search(q),
        None => catalog::tools().iter().collect(),
    };
    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        found.retain(|tool| tool.category == category);
    }
    Ok(Json(found.into_iter().copied().collect()))
}

pub async fn describe_tool(Path(id): Path<String>) -> Result<Json<ToolDescriptor>, ApiError> {
    catalog::find(&id)
        .copied()
        .map(Json)
        .ok_or_else(|| ToolError::UnknownTool(id).into())
}

// =============================================================================
// EXECUTION
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ToolRun {
    pub tool: String,
    pub result: Value,
}

/// Decode a request body; an empty body means every field takes its default.
pub(crate) fn decode_body(body: &[u8]) -> Result<Value, ToolError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| ToolError::Malformed(format!("body is not valid JSON: {e}")))
}

pub async fn run_tool(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ToolRun>, ApiError> {
    if catalog::find(&id).is_none() {
        return Err(ToolError::UnknownTool(id).into());
    }
    let input = decode_body(&body?)?;

    let started = Instant::now();
    let tool = id.clone();
    let outcome = tokio::task::spawn_blocking(move || execute(&state.tool_context(), &tool, input))
        .await
        .map_err(|e| {
            error!(tool = %id, error = %e, "tool task panicked");
            ApiError::internal()
        })?;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match outcome {
        Ok(result) => {
            info!(tool = %id, elapsed_ms, "tool executed");
            Ok(Json(ToolRun { tool: id, result }))
        }
        Err(e) => {
            debug!(tool = %id, elapsed_ms, error = %e, "tool rejected request");
            Err(e.into())
        }
    }
}

// =============================================================================
// SVG DOWNLOADS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct QrSvgQuery {
    pub text: String,
    pub ecc: Option<String>,
    pub size: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct BarcodeSvgQuery {
    pub text: String,
    pub height: Option<u32>,
    pub module_width: Option<u32>,
}

pub async fn qr_svg(query: Result<Query<QrSvgQuery>, QueryRejection>) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let rendered = codes::qr_code(QrRequest { text: query.text, ecc: query.ecc, size: query.size })?;
    Ok(svg_download("qr-code.svg", rendered.svg))
}

pub async fn barcode_svg(query: Result<Query<BarcodeSvgQuery>, QueryRejection>) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let rendered = codes::barcode(BarcodeRequest {
        text: query.text,
        height: query.height,
        module_width: query.module_width,
    })?;
    Ok(svg_download("barcode.svg", rendered.svg))
}

fn svg_download(filename: &str, svg: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/svg+xml".to_owned()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
        ],
        svg,
    )
        .into_response()
}

#[cfg(test)]
#[path = "tools_test.rs"]
mod tests;
