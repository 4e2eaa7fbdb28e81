//! Color notation conversion between hex, RGB and HSL.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::tools::ToolError;

static RGB_REGEX: OnceLock<Regex> = OnceLock::new();
static HSL_REGEX: OnceLock<Regex> = OnceLock::new();

fn rgb_regex() -> &'static Regex {
    RGB_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^rgba?\(\s*(\d{1,3})\s*[,\s]\s*(\d{1,3})\s*[,\s]\s*(\d{1,3})\s*(?:[,/]\s*[\d.]+%?\s*)?\)$")
            .expect("rgb regex is valid")
    })
}

fn hsl_regex() -> &'static Regex {
    HSL_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^hsla?\(\s*(\d+(?:\.\d+)?)(?:deg)?\s*[,\s]\s*(\d+(?:\.\d+)?)%\s*[,\s]\s*(\d+(?:\.\d+)?)%\s*(?:[,/]\s*[\d.]+%?\s*)?\)$")
            .expect("hsl regex is valid")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsl {
    /// Degrees, `0..360`.
    pub h: f64,
    /// Percent, `0..=100`.
    pub s: f64,
    /// Percent, `0..=100`.
    pub l: f64,
}

/// Parse `#RGB` or `#RRGGBB` (leading `#` optional) into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<Rgb> {
    let trimmed = raw.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some(Rgb { r, g, b })
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgb { r, g, b })
        }
        _ => None,
    }
}

impl Rgb {
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Standard hue-sector conversion.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;

        if d.abs() < f64::EPSILON {
            return Hsl { h: 0.0, s: 0.0, l: l * 100.0 };
        }

        let s = d / (1.0 - (2.0 * l - 1.0).abs());
        let h = if (max - r).abs() < f64::EPSILON {
            60.0 * ((g - b) / d).rem_euclid(6.0)
        } else if (max - g).abs() < f64::EPSILON {
            60.0 * ((b - r) / d + 2.0)
        } else {
            60.0 * ((r - g) / d + 4.0)
        };
        Hsl { h, s: s * 100.0, l: l * 100.0 }
    }

    /// WCAG relative luminance, `0.0..=1.0`.
    #[must_use]
    pub fn luminance(self) -> f64 {
        let channel = |c: u8| {
            let v = f64::from(c) / 255.0;
            if v <= 0.039_28 { v / 12.92 } else { ((v + 0.055) / 1.055).powf(2.4) }
        };
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }
}

impl Hsl {
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let s = self.s / 100.0;
        let l = self.l / 100.0;
        let h = self.h.rem_euclid(360.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let m = l - c / 2.0;
        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Rgb { r: to_channel(r + m), g: to_channel(g + m), b: to_channel(b + m) }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Parse any supported notation.
pub fn parse_color(raw: &str) -> Result<Rgb, ToolError> {
    let trimmed = raw.trim();
    if let Some(rgb) = parse_hex_rgb(trimmed) {
        return Ok(rgb);
    }
    if let Some(caps) = rgb_regex().captures(trimmed) {
        let channel = |i: usize| -> Result<u8, ToolError> {
            caps[i].parse::<u8>().map_err(|_| ToolError::invalid("input", "rgb channels must be 0-255"))
        };
        return Ok(Rgb { r: channel(1)?, g: channel(2)?, b: channel(3)? });
    }
    if let Some(caps) = hsl_regex().captures(trimmed) {
        let component = |i: usize| caps[i].parse::<f64>().map_err(|_| ToolError::invalid("input", "bad hsl component"));
        let (h, s, l) = (component(1)?, component(2)?, component(3)?);
        if s > 100.0 || l > 100.0 {
            return Err(ToolError::invalid("input", "saturation and lightness must be 0-100%"));
        }
        return Ok(Hsl { h, s, l }.to_rgb());
    }
    Err(ToolError::invalid("input", "expected #rgb, #rrggbb, rgb(r, g, b) or hsl(h, s%, l%)"))
}

#[derive(Debug, Deserialize)]
pub struct ColorRequest {
    pub input: String,
}

#[derive(Debug, Serialize)]
pub struct ColorResponse {
    pub hex: String,
    pub rgb: Rgb,
    pub hsl: Hsl,
    pub css_rgb: String,
    pub css_hsl: String,
    pub luminance: f64,
    /// Black or white, whichever reads better on this background.
    pub contrast_text: &'static str,
}

pub fn convert(req: ColorRequest) -> Result<ColorResponse, ToolError> {
    let rgb = parse_color(&req.input)?;
    let hsl = rgb.to_hsl();
    let rounded = Hsl { h: hsl.h.round(), s: hsl.s.round(), l: hsl.l.round() };
    let luminance = rgb.luminance();

    Ok(ColorResponse {
        hex: rgb.to_hex(),
        rgb,
        hsl: rounded,
        css_rgb: format!("rgb({}, {}, {})", rgb.r, rgb.g, rgb.b),
        css_hsl: format!("hsl({}, {}%, {}%)", rounded.h, rounded.s, rounded.l),
        luminance: (luminance * 10_000.0).round() / 10_000.0,
        contrast_text: if luminance > 0.179 { "#000000" } else { "#ffffff" },
    })
}

#[cfg(test)]
#[path = "color_test.rs"]
mod tests;
