//! Base64 and URL percent-encoding of UTF-8 text.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::tools::{ToolError, lenient};

/// Decoders accept input with or without trailing `=` padding.
const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Characters `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// `encodeURI` additionally keeps the reserved URI delimiters.
const FULL_URI: &AsciiSet = &COMPONENT
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Encode,
    Decode,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct EncodingResponse {
    pub mode: Mode,
    pub output: String,
    pub input_length: usize,
    pub output_length: usize,
}

fn respond(mode: Mode, input: &str, output: String) -> EncodingResponse {
    EncodingResponse { mode, input_length: input.len(), output_length: output.len(), output }
}

// =============================================================================
// BASE64
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct Base64Request {
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
    pub mode: Mode,
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    pub url_safe: Option<bool>,
}

pub fn base64(req: Base64Request) -> Result<EncodingResponse, ToolError> {
    let url_safe = req.url_safe.unwrap_or(false);
    let output = match req.mode {
        Mode::Encode if url_safe => URL_SAFE_NO_PAD.encode(req.text.as_bytes()),
        Mode::Encode => STANDARD.encode(req.text.as_bytes()),
        Mode::Decode => {
            let compact: String = req.text.chars().filter(|c| !c.is_whitespace()).collect();
            let engine = if url_safe { &URL_SAFE_LENIENT } else { &STANDARD_LENIENT };
            let bytes = engine
                .decode(compact.as_bytes())
                .map_err(|e| ToolError::invalid("text", format!("not valid Base64: {e}")))?;
            String::from_utf8(bytes).map_err(|_| ToolError::invalid("text", "decoded bytes are not UTF-8 text"))?
        }
    };
    Ok(respond(req.mode, &req.text, output))
}

// =============================================================================
// URL
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
    pub mode: Mode,
    /// `true` (default) escapes a single component, `false` a whole URI.
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    pub component: Option<bool>,
}

pub fn url(req: UrlRequest) -> Result<EncodingResponse, ToolError> {
    let output = match req.mode {
        Mode::Encode => {
            let set = if req.component.unwrap_or(true) { COMPONENT } else { FULL_URI };
            utf8_percent_encode(&req.text, set).to_string()
        }
        Mode::Decode => {
            check_escapes(&req.text)?;
            percent_decode_str(&req.text)
                .decode_utf8()
                .map_err(|_| ToolError::invalid("text", "decoded bytes are not UTF-8 text"))?
                .into_owned()
        }
    };
    Ok(respond(req.mode, &req.text, output))
}

/// Every `%` must start a two-digit hex escape.
fn check_escapes(text: &str) -> Result<(), ToolError> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.get(i + 1..i + 3).is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(ToolError::invalid("text", format!("malformed escape at byte {i}")));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "encoding_test.rs"]
mod tests;
