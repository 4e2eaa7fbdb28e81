//! Length, weight, area, volume and temperature conversion.
//!
//! Linear families convert through a base unit with a fixed multiplicative
//! factor. Temperature is affine and handled separately.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tools::{ToolError, lenient};

/// Significant digits kept in converted values.
const SIGNIFICANT_DIGITS: i32 = 12;

#[derive(Debug)]
pub struct Unit {
    pub id: &'static str,
    pub symbols: &'static [&'static str],
    /// Size of one of this unit in the family's base unit.
    pub factor: f64,
}

#[derive(Debug)]
pub struct UnitFamily {
    pub name: &'static str,
    pub base: &'static str,
    pub units: &'static [Unit],
}

impl UnitFamily {
    /// Resolve a unit by id, symbol or plural spelling, case-insensitively.
    #[must_use]
    pub fn find(&self, raw: &str) -> Option<&Unit> {
        let key = raw.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        let singular = key.strip_suffix('s').unwrap_or(&key);
        self.units
            .iter()
            .find(|u| {
                u.id == key
                    || u.id == singular
                    || u.symbols.iter().any(|s| s.eq_ignore_ascii_case(&key) || (s.len() > 2 && s.eq_ignore_ascii_case(singular)))
            })
    }

    fn resolve(&self, raw: &str) -> Result<&Unit, ToolError> {
        self.find(raw).ok_or_else(|| ToolError::UnknownUnit(format!("{} (not a {} unit)", raw.trim(), self.name)))
    }
}

macro_rules! unit {
    ($id:literal, [$($sym:literal),*], $factor:expr) => {
        Unit { id: $id, symbols: &[$($sym),*], factor: $factor }
    };
}

pub static LENGTH: UnitFamily = UnitFamily {
    name: "length",
    base: "meter",
    units: &[
        unit!("millimeter", ["mm", "millimetre"], 0.001),
        unit!("centimeter", ["cm", "centimetre"], 0.01),
        unit!("meter", ["m", "metre"], 1.0),
        unit!("kilometer", ["km", "kilometre"], 1000.0),
        unit!("inch", ["in", "inches"], 0.0254),
        unit!("foot", ["ft", "feet"], 0.3048),
        unit!("yard", ["yd"], 0.9144),
        unit!("mile", ["mi"], 1609.344),
        unit!("nautical_mile", ["nmi"], 1852.0),
    ],
};

pub static WEIGHT: UnitFamily = UnitFamily {
    name: "weight",
    base: "kilogram",
    units: &[
        unit!("milligram", ["mg"], 1e-6),
        unit!("gram", ["g"], 1e-3),
        unit!("kilogram", ["kg"], 1.0),
        unit!("tonne", ["t", "metric_ton"], 1000.0),
        unit!("ounce", ["oz"], 0.028_349_523_125),
        unit!("pound", ["lb", "lbs"], 0.453_592_37),
        unit!("stone", ["st"], 6.350_293_18),
        unit!("short_ton", ["ton", "us_ton"], 907.184_74),
    ],
};

pub static AREA: UnitFamily = UnitFamily {
    name: "area",
    base: "square_meter",
    units: &[
        unit!("square_millimeter", ["mm2", "square_millimetre"], 1e-6),
        unit!("square_centimeter", ["cm2", "square_centimetre"], 1e-4),
        unit!("square_meter", ["m2", "square_metre"], 1.0),
        unit!("hectare", ["ha"], 10_000.0),
        unit!("square_kilometer", ["km2", "square_kilometre"], 1e6),
        unit!("square_inch", ["in2", "sq_in"], 0.000_645_16),
        unit!("square_foot", ["ft2", "sq_ft", "square_feet"], 0.092_903_04),
        unit!("square_yard", ["yd2", "sq_yd"], 0.836_127_36),
        unit!("acre", ["ac"], 4_046.856_422_4),
        unit!("square_mile", ["mi2", "sq_mi"], 2_589_988.110_336),
    ],
};

pub static VOLUME: UnitFamily = UnitFamily {
    name: "volume",
    base: "liter",
    units: &[
        unit!("milliliter", ["ml", "millilitre"], 0.001),
        unit!("liter", ["l", "litre"], 1.0),
        unit!("cubic_meter", ["m3", "cubic_metre"], 1000.0),
        unit!("teaspoon", ["tsp"], 0.004_928_921_593_75),
        unit!("tablespoon", ["tbsp"], 0.014_786_764_781_25),
        unit!("fluid_ounce", ["fl_oz", "floz"], 0.029_573_529_562_5),
        unit!("cup", ["c"], 0.236_588_236_5),
        unit!("pint", ["pt"], 0.473_176_473),
        unit!("quart", ["qt"], 0.946_352_946),
        unit!("gallon", ["gal"], 3.785_411_784),
        unit!("cubic_inch", ["in3"], 0.016_387_064),
        unit!("cubic_foot", ["ft3"], 28.316_846_592),
    ],
};

// =============================================================================
// LINEAR CONVERSION
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    #[serde(deserialize_with = "lenient::number")]
    pub value: f64,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub value: f64,
    pub from: &'static str,
    pub to: &'static str,
    pub result: f64,
    /// The input expressed in every unit of the family.
    pub all: BTreeMap<&'static str, f64>,
}

pub fn convert(family: &UnitFamily, req: ConvertRequest) -> Result<ConvertResponse, ToolError> {
    let from = family.resolve(&req.from)?;
    let to = family.resolve(&req.to)?;

    let base = req.value * from.factor;
    let all = family.units.iter().map(|u| (u.id, significant(base / u.factor))).collect();

    Ok(ConvertResponse { value: req.value, from: from.id, to: to.id, result: significant(base / to.factor), all })
}

/// Round to a fixed number of significant digits to hide factor noise
/// (e.g. `0.30480000000000002`).
#[must_use]
pub fn significant(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    #[allow(clippy::cast_possible_truncation)]
    let magnitude = value.abs().log10().floor() as i32;
    let places = SIGNIFICANT_DIGITS - 1 - magnitude;
    if !(0..=300).contains(&places) {
        return value;
    }
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}

// =============================================================================
// TEMPERATURE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
    Rankine,
}

impl TemperatureScale {
    pub const ALL: [Self; 4] = [Self::Celsius, Self::Fahrenheit, Self::Kelvin, Self::Rankine];

    fn parse(raw: &str) -> Result<Self, ToolError> {
        match raw.trim().to_ascii_lowercase().trim_start_matches('°') {
            "c" | "celsius" => Ok(Self::Celsius),
            "f" | "fahrenheit" => Ok(Self::Fahrenheit),
            "k" | "kelvin" => Ok(Self::Kelvin),
            "r" | "rankine" => Ok(Self::Rankine),
            _ => Err(ToolError::UnknownUnit(format!("{} (not a temperature scale)", raw.trim()))),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
            Self::Kelvin => "kelvin",
            Self::Rankine => "rankine",
        }
    }

    fn to_kelvin(self, value: f64) -> f64 {
        match self {
            Self::Celsius => value + 273.15,
            Self::Fahrenheit => (value + 459.67) * 5.0 / 9.0,
            Self::Kelvin => value,
            Self::Rankine => value * 5.0 / 9.0,
        }
    }

    fn from_kelvin(self, kelvin: f64) -> f64 {
        match self {
            Self::Celsius => kelvin - 273.15,
            Self::Fahrenheit => kelvin * 9.0 / 5.0 - 459.67,
            Self::Kelvin => kelvin,
            Self::Rankine => kelvin * 9.0 / 5.0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TemperatureResponse {
    pub value: f64,
    pub from: TemperatureScale,
    pub to: TemperatureScale,
    pub result: f64,
    pub all: BTreeMap<&'static str, f64>,
}

pub fn temperature(req: ConvertRequest) -> Result<TemperatureResponse, ToolError> {
    let from = TemperatureScale::parse(&req.from)?;
    let to = TemperatureScale::parse(&req.to)?;

    let kelvin = from.to_kelvin(req.value);
    // Allow float noise right at absolute zero.
    if kelvin < -1e-9 {
        return Err(ToolError::invalid("value", "is below absolute zero"));
    }
    let kelvin = kelvin.max(0.0);

    let round = |v: f64| (v * 1e6).round() / 1e6;
    let all = TemperatureScale::ALL.iter().map(|s| (s.as_str(), round(s.from_kelvin(kelvin)))).collect();

    Ok(TemperatureResponse { value: req.value, from, to, result: round(to.from_kelvin(kelvin)), all })
}

#[cfg(test)]
#[path = "units_test.rs"]
mod tests;
