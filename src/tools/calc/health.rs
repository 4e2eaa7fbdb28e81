//! Body mass index.

use serde::{Deserialize, Serialize};

use crate::tools::{ToolError, lenient, require_positive, round_to};

/// Imperial BMI conversion constant (lb/in² to kg/m²).
const IMPERIAL_FACTOR: f64 = 703.0;
const HEALTHY_MIN: f64 = 18.5;
const HEALTHY_MAX: f64 = 24.9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Kilograms and centimetres.
    #[default]
    Metric,
    /// Pounds and inches.
    Imperial,
}

#[derive(Debug, Deserialize)]
pub struct BmiRequest {
    #[serde(deserialize_with = "lenient::number")]
    pub weight: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub height: f64,
    #[serde(default)]
    pub units: UnitSystem,
}

#[derive(Debug, Serialize)]
pub struct BmiResponse {
    pub bmi: f64,
    pub category: &'static str,
    pub healthy_weight_min: f64,
    pub healthy_weight_max: f64,
    pub weight_unit: &'static str,
}

pub fn bmi(req: BmiRequest) -> Result<BmiResponse, ToolError> {
    let weight = require_positive("weight", req.weight)?;
    let height = require_positive("height", req.height)?;

    let (value, min, max, weight_unit) = match req.units {
        UnitSystem::Metric => {
            let metres = height / 100.0;
            let h2 = metres * metres;
            (weight / h2, HEALTHY_MIN * h2, HEALTHY_MAX * h2, "kg")
        }
        UnitSystem::Imperial => {
            let h2 = height * height;
            (IMPERIAL_FACTOR * weight / h2, HEALTHY_MIN * h2 / IMPERIAL_FACTOR, HEALTHY_MAX * h2 / IMPERIAL_FACTOR, "lb")
        }
    };

    Ok(BmiResponse {
        bmi: round_to(value, 2),
        category: category(value),
        healthy_weight_min: round_to(min, 1),
        healthy_weight_max: round_to(max, 1),
        weight_unit,
    })
}

/// WHO adult classification.
#[must_use]
pub fn category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal weight"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    }
}

#[cfg(test)]
#[path = "health_test.rs"]
mod tests;
