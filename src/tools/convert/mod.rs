//! Converters: measurement units, currency, color, time zones, number
//! systems and text encodings.

pub mod color;
pub mod currency;
pub mod encoding;
pub mod number_base;
pub mod roman;
pub mod timezone;
pub mod units;
