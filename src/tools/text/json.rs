//! JSON pretty-printing, minifying and validation.

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};

use crate::tools::{ToolError, lenient};

const DEFAULT_INDENT: u32 = 2;
const MAX_INDENT: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Pretty,
    Minify,
    Validate,
}

#[derive(Debug, Deserialize)]
pub struct JsonRequest {
    pub text: String,
    pub mode: Mode,
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub indent: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    pub sort_keys: Option<bool>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SyntaxProblem {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Serialize)]
pub struct JsonResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<SyntaxProblem>,
    /// `object`, `array`, `string`, ... of the top-level value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<&'static str>,
    pub input_size: usize,
    pub output_size: usize,
}

pub fn format(req: JsonRequest) -> Result<JsonResponse, ToolError> {
    let indent = req.indent.unwrap_or(DEFAULT_INDENT);
    if indent > MAX_INDENT {
        return Err(ToolError::invalid("indent", format!("must be between 0 and {MAX_INDENT}")));
    }

    let parsed = serde_json::from_str::<Value>(&req.text);
    let value = match (parsed, req.mode) {
        (Ok(value), _) => value,
        (Err(e), Mode::Validate) => {
            return Ok(JsonResponse {
                valid: false,
                output: None,
                problem: Some(problem(&e)),
                root: None,
                input_size: req.text.len(),
                output_size: 0,
            });
        }
        (Err(e), _) => {
            let p = problem(&e);
            return Err(ToolError::invalid("text", format!("line {} column {}: {}", p.line, p.column, p.message)));
        }
    };

    let value = if req.sort_keys.unwrap_or(false) { sort_keys(value) } else { value };
    let output = match req.mode {
        Mode::Pretty => Some(pretty(&value, indent)?),
        Mode::Minify => Some(value.to_string()),
        Mode::Validate => None,
    };

    Ok(JsonResponse {
        valid: true,
        output_size: output.as_ref().map_or(0, String::len),
        output,
        problem: None,
        root: Some(kind(&value)),
        input_size: req.text.len(),
    })
}

fn pretty(value: &Value, indent: u32) -> Result<String, ToolError> {
    let pad = " ".repeat(indent as usize);
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(pad.as_bytes()));
    value.serialize(&mut ser).map_err(|e| ToolError::Malformed(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| ToolError::Malformed(e.to_string()))
}

/// Recursively order object keys.
#[must_use]
pub fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect::<Map<_, _>>())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

fn problem(e: &serde_json::Error) -> SyntaxProblem {
    // serde_json appends " at line X column Y" to its Display output.
    let full = e.to_string();
    let message = full.rsplit_once(" at line ").map_or(full.as_str(), |(head, _)| head).to_owned();
    SyntaxProblem { message, line: e.line(), column: e.column() }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "json_test.rs"]
mod tests;
