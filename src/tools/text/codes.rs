//! QR code and Code 128 barcode rendering to SVG.

use std::fmt::Write as _;

use qrcode::render::svg;
use qrcode::{EcLevel, QrCode, Version};
use serde::{Deserialize, Serialize};

use crate::tools::{ToolError, lenient};

// =============================================================================
// QR CODE
// =============================================================================

const QR_DEFAULT_SIZE: u32 = 256;
const QR_SIZE_RANGE: std::ops::RangeInclusive<u32> = 64..=2048;

#[derive(Debug, Default, Deserialize)]
pub struct QrRequest {
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
    /// `L`, `M` (default), `Q` or `H`.
    #[serde(default)]
    pub ecc: Option<String>,
    /// Edge length of the SVG in pixels.
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct QrResponse {
    pub svg: String,
    pub version: i16,
    pub modules: usize,
    pub ecc: &'static str,
}

pub fn qr_code(req: QrRequest) -> Result<QrResponse, ToolError> {
    if req.text.is_empty() {
        return Err(ToolError::invalid("text", "nothing to encode"));
    }
    let (level, label) = parse_ecc(req.ecc.as_deref())?;
    let size = req.size.unwrap_or(QR_DEFAULT_SIZE);
    if !QR_SIZE_RANGE.contains(&size) {
        return Err(ToolError::invalid(
            "size",
            format!("must be between {} and {}", QR_SIZE_RANGE.start(), QR_SIZE_RANGE.end()),
        ));
    }

    let code = QrCode::with_error_correction_level(req.text.as_bytes(), level)
        .map_err(|e| ToolError::invalid("text", format!("cannot encode as QR: {e}")))?;
    let svg = code
        .render::<svg::Color>()
        .min_dimensions(size, size)
        .max_dimensions(size, size)
        .build();
    let version = match code.version() {
        Version::Normal(v) | Version::Micro(v) => v,
    };

    Ok(QrResponse { svg, version, modules: code.width(), ecc: label })
}

fn parse_ecc(raw: Option<&str>) -> Result<(EcLevel, &'static str), ToolError> {
    match raw.map(|s| s.trim().to_ascii_uppercase()).as_deref() {
        None | Some("" | "M") => Ok((EcLevel::M, "M")),
        Some("L") => Ok((EcLevel::L, "L")),
        Some("Q") => Ok((EcLevel::Q, "Q")),
        Some("H") => Ok((EcLevel::H, "H")),
        Some(other) => Err(ToolError::invalid("ecc", format!("`{other}` is not one of L, M, Q, H"))),
    }
}

// =============================================================================
// CODE 128
// =============================================================================

/// Bar/space widths for symbol values 0..=106 (106 is the stop pattern).
const PATTERNS: [&str; 107] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312",
    "132212", "221213", "221312", "231212", "112232", "122132", "122231", "113222",
    "123122", "123221", "223211", "221132", "221231", "213212", "223112", "312131",
    "311222", "321122", "321221", "312212", "322112", "322211", "212123", "212321",
    "232121", "111323", "131123", "131321", "112313", "132113", "132311", "211313",
    "231113", "231311", "112133", "112331", "132131", "113123", "113321", "133121",
    "313121", "211331", "231131", "213113", "213311", "213131", "311123", "311321",
    "331121", "312113", "312311", "332111", "314111", "221411", "431111", "111224",
    "111422", "121124", "121421", "141122", "141221", "112214", "112412", "122114",
    "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111",
    "111242", "121142", "121241", "114212", "124112", "124211", "411212", "421112",
    "421211", "212141", "214121", "412121", "111143", "111341", "131141", "114113",
    "114311", "411113", "411311", "113141", "114131", "311141", "411131", "211412",
    "211214", "211232", "2331112",
];

const START_B: usize = 104;
const STOP: usize = 106;
const QUIET_ZONE: u32 = 10;
const MAX_BARCODE_CHARS: usize = 80;

#[derive(Debug, Default, Deserialize)]
pub struct BarcodeRequest {
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub height: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub module_width: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct BarcodeResponse {
    pub svg: String,
    pub checksum: usize,
    pub width: u32,
    pub height: u32,
}

pub fn barcode(req: BarcodeRequest) -> Result<BarcodeResponse, ToolError> {
    let height = req.height.unwrap_or(80);
    let module = req.module_width.unwrap_or(2);
    if !(10..=1000).contains(&height) {
        return Err(ToolError::invalid("height", "must be between 10 and 1000"));
    }
    if !(1..=10).contains(&module) {
        return Err(ToolError::invalid("module_width", "must be between 1 and 10"));
    }

    let symbols = encode_code128b(&req.text)?;
    let checksum = symbols[symbols.len() - 2];

    let mut bars = Vec::new();
    let mut x = QUIET_ZONE;
    for &symbol in &symbols {
        for (i, width) in PATTERNS[symbol].bytes().map(|b| u32::from(b - b'0')).enumerate() {
            if i % 2 == 0 {
                bars.push((x, width));
            }
            x += width;
        }
    }
    let total_modules = x + QUIET_ZONE;
    let width = total_modules * module;

    let mut svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" shape-rendering="crispEdges"><rect width="100%" height="100%" fill="#ffffff"/>"##
    );
    for (start, w) in bars {
        let _ = write!(svg, r##"<rect x="{}" y="0" width="{}" height="{height}" fill="#000000"/>"##, start * module, w * module);
    }
    svg.push_str("</svg>");

    Ok(BarcodeResponse { svg, checksum, width, height })
}

/// Symbol values for `text` in code set B: start, data, checksum, stop.
pub fn encode_code128b(text: &str) -> Result<Vec<usize>, ToolError> {
    if text.is_empty() {
        return Err(ToolError::invalid("text", "nothing to encode"));
    }
    if text.chars().count() > MAX_BARCODE_CHARS {
        return Err(ToolError::invalid("text", format!("at most {MAX_BARCODE_CHARS} characters")));
    }

    let mut symbols = Vec::with_capacity(text.len() + 3);
    symbols.push(START_B);
    let mut sum = START_B;
    for (position, c) in text.chars().enumerate() {
        if !(' '..='~').contains(&c) {
            return Err(ToolError::invalid("text", format!("`{}` cannot be encoded in Code 128", c.escape_default())));
        }
        let value = c as usize - 32;
        sum += (position + 1) * value;
        symbols.push(value);
    }
    symbols.push(sum % 103);
    symbols.push(STOP);
    Ok(symbols)
}

#[cfg(test)]
#[path = "codes_test.rs"]
mod tests;
