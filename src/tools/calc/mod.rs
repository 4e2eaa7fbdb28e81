//! Calculators: health, finance, everyday arithmetic, grades and dates.

pub mod dates;
pub mod everyday;
pub mod finance;
pub mod grade;
pub mod health;
