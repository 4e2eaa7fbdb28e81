//! Weighted grade average with letter grade and GPA points.

use serde::{Deserialize, Serialize};

use crate::tools::{ToolError, lenient, require_non_negative, require_positive, round_to};

/// Lower bound (inclusive percent), letter, 4.0-scale points.
const LETTER_SCALE: &[(f64, &str, f64)] = &[
    (97.0, "A+", 4.0),
    (93.0, "A", 4.0),
    (90.0, "A-", 3.7),
    (87.0, "B+", 3.3),
    (83.0, "B", 3.0),
    (80.0, "B-", 2.7),
    (77.0, "C+", 2.3),
    (73.0, "C", 2.0),
    (70.0, "C-", 1.7),
    (67.0, "D+", 1.3),
    (63.0, "D", 1.0),
    (60.0, "D-", 0.7),
];

#[derive(Debug, Deserialize)]
pub struct Assignment {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub score: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub max_score: f64,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub weight: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Serialize)]
pub struct AssignmentResult {
    pub name: String,
    pub percent: f64,
    pub letter: &'static str,
}

#[derive(Debug, Serialize)]
pub struct GradeResponse {
    pub percent: f64,
    pub letter: &'static str,
    pub gpa_points: f64,
    pub points_earned: f64,
    pub points_possible: f64,
    pub assignments: Vec<AssignmentResult>,
}

pub fn grade(req: GradeRequest) -> Result<GradeResponse, ToolError> {
    if req.assignments.is_empty() {
        return Err(ToolError::invalid("assignments", "at least one assignment is required"));
    }

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    let mut earned = 0.0;
    let mut possible = 0.0;
    let mut rows = Vec::with_capacity(req.assignments.len());

    for (index, a) in req.assignments.into_iter().enumerate() {
        let score = require_non_negative("score", a.score)?;
        let max = require_positive("max_score", a.max_score)?;
        let weight = require_non_negative("weight", a.weight.unwrap_or(1.0))?;
        let percent = score / max * 100.0;

        weighted_sum += percent * weight;
        weight_total += weight;
        earned += score;
        possible += max;
        rows.push(AssignmentResult {
            name: a.name.unwrap_or_else(|| format!("Assignment {}", index + 1)),
            percent: round_to(percent, 2),
            letter: letter(percent).0,
        });
    }

    if weight_total <= 0.0 {
        return Err(ToolError::invalid("weight", "weights must not all be zero"));
    }

    let percent = weighted_sum / weight_total;
    let (letter, gpa_points) = letter(percent);
    Ok(GradeResponse {
        percent: round_to(percent, 2),
        letter,
        gpa_points,
        points_earned: round_to(earned, 2),
        points_possible: round_to(possible, 2),
        assignments: rows,
    })
}

/// Letter grade and GPA points for a percentage.
#[must_use]
pub fn letter(percent: f64) -> (&'static str, f64) {
    LETTER_SCALE
        .iter()
        .find(|(floor, _, _)| percent >= *floor)
        .map_or(("F", 0.0), |(_, letter, points)| (*letter, *points))
}

#[cfg(test)]
#[path = "grade_test.rs"]
mod tests;
