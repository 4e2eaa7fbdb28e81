//! Everyday arithmetic: tips, discounts, sales tax, unit prices, fuel cost
//! and percentages.

use serde::{Deserialize, Serialize};

use crate::tools::{ToolError, cents, lenient, require_non_negative, require_positive, round_to};

// =============================================================================
// TIP
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct TipRequest {
    #[serde(deserialize_with = "lenient::number")]
    pub bill: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub tip_percent: f64,
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub people: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct TipResponse {
    pub tip: f64,
    pub total: f64,
    pub tip_per_person: f64,
    pub total_per_person: f64,
}

pub fn tip(req: TipRequest) -> Result<TipResponse, ToolError> {
    let bill = require_non_negative("bill", req.bill)?;
    let percent = require_non_negative("tip_percent", req.tip_percent)?;
    let people = req.people.unwrap_or(1);
    if people == 0 {
        return Err(ToolError::invalid("people", "must be at least 1"));
    }

    let tip = bill * percent / 100.0;
    let total = bill + tip;
    let split = f64::from(people);
    Ok(TipResponse { tip: cents(tip), total: cents(total), tip_per_person: cents(tip / split), total_per_person: cents(total / split) })
}

// =============================================================================
// DISCOUNT
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct DiscountRequest {
    #[serde(deserialize_with = "lenient::number")]
    pub price: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub discount_percent: f64,
    /// Applied after the first discount, e.g. "extra 10% off sale price".
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub extra_discount_percent: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct DiscountResponse {
    pub final_price: f64,
    pub savings: f64,
    pub effective_discount_percent: f64,
}

pub fn discount(req: DiscountRequest) -> Result<DiscountResponse, ToolError> {
    let price = require_non_negative("price", req.price)?;
    let first = percent_in_range("discount_percent", req.discount_percent)?;
    let extra = percent_in_range("extra_discount_percent", req.extra_discount_percent.unwrap_or(0.0))?;

    let final_price = price * (1.0 - first / 100.0) * (1.0 - extra / 100.0);
    let savings = price - final_price;
    let effective = if price > 0.0 { savings / price * 100.0 } else { 0.0 };
    Ok(DiscountResponse {
        final_price: cents(final_price),
        savings: cents(savings),
        effective_discount_percent: round_to(effective, 2),
    })
}

fn percent_in_range(field: &'static str, value: f64) -> Result<f64, ToolError> {
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(ToolError::invalid(field, "must be between 0 and 100"))
    }
}

// =============================================================================
// SALES TAX
// =============================================================================

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxMode {
    /// Amount is pre-tax; add tax on top.
    #[default]
    Add,
    /// Amount already includes tax; back it out.
    Extract,
}

#[derive(Debug, Deserialize)]
pub struct SalesTaxRequest {
    #[serde(deserialize_with = "lenient::number")]
    pub amount: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub rate_percent: f64,
    #[serde(default)]
    pub mode: TaxMode,
}

#[derive(Debug, Serialize)]
pub struct SalesTaxResponse {
    pub net: f64,
    pub tax: f64,
    pub gross: f64,
}

pub fn sales_tax(req: SalesTaxRequest) -> Result<SalesTaxResponse, ToolError> {
    let amount = require_non_negative("amount", req.amount)?;
    let rate = require_non_negative("rate_percent", req.rate_percent)? / 100.0;

    let (net, gross) = match req.mode {
        TaxMode::Add => (amount, amount * (1.0 + rate)),
        TaxMode::Extract => (amount / (1.0 + rate), amount),
    };
    Ok(SalesTaxResponse { net: cents(net), tax: cents(gross - net), gross: cents(gross) })
}

// =============================================================================
// UNIT PRICE
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct PricedItem {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub price: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub quantity: f64,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UnitPriceRequest {
    pub items: Vec<PricedItem>,
}

#[derive(Debug, Serialize)]
pub struct UnitPriceRow {
    pub label: String,
    pub unit_price: f64,
    pub unit: Option<String>,
    /// Percent more expensive per unit than the best item.
    pub premium_percent: f64,
}

#[derive(Debug, Serialize)]
pub struct UnitPriceResponse {
    pub items: Vec<UnitPriceRow>,
    pub best_value: String,
}

pub fn unit_price(req: UnitPriceRequest) -> Result<UnitPriceResponse, ToolError> {
    if req.items.is_empty() {
        return Err(ToolError::invalid("items", "at least one item is required"));
    }

    let mut priced = Vec::with_capacity(req.items.len());
    for (index, item) in req.items.into_iter().enumerate() {
        let price = require_non_negative("price", item.price)?;
        let quantity = require_positive("quantity", item.quantity)?;
        let label = item.label.filter(|l| !l.trim().is_empty()).unwrap_or_else(|| format!("Item {}", index + 1));
        priced.push((label, price / quantity, item.unit));
    }

    let best = priced
        .iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(label, price, _)| (label.clone(), *price))
        .ok_or_else(|| ToolError::invalid("items", "at least one item is required"))?;

    let items = priced
        .into_iter()
        .map(|(label, price, unit)| UnitPriceRow {
            label,
            unit_price: round_to(price, 4),
            unit,
            premium_percent: if best.1 > 0.0 { round_to((price / best.1 - 1.0) * 100.0, 2) } else { 0.0 },
        })
        .collect();

    Ok(UnitPriceResponse { items, best_value: best.0 })
}

// =============================================================================
// FUEL COST
// =============================================================================

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyUnit {
    /// Litres per 100 km; distance in km, price per litre.
    #[default]
    LPer100km,
    /// Miles per gallon; distance in miles, price per gallon.
    Mpg,
    /// Kilometres per litre; distance in km, price per litre.
    KmPerL,
}

#[derive(Debug, Deserialize)]
pub struct FuelCostRequest {
    #[serde(deserialize_with = "lenient::number")]
    pub distance: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub efficiency: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub price_per_unit: f64,
    #[serde(default)]
    pub efficiency_unit: EfficiencyUnit,
}

#[derive(Debug, Serialize)]
pub struct FuelCostResponse {
    pub fuel_used: f64,
    pub fuel_unit: &'static str,
    pub total_cost: f64,
    pub cost_per_distance: f64,
}

pub fn fuel_cost(req: FuelCostRequest) -> Result<FuelCostResponse, ToolError> {
    let distance = require_non_negative("distance", req.distance)?;
    let efficiency = require_positive("efficiency", req.efficiency)?;
    let price = require_non_negative("price_per_unit", req.price_per_unit)?;

    let (fuel, fuel_unit) = match req.efficiency_unit {
        EfficiencyUnit::LPer100km => (distance * efficiency / 100.0, "liter"),
        EfficiencyUnit::Mpg => (distance / efficiency, "gallon"),
        EfficiencyUnit::KmPerL => (distance / efficiency, "liter"),
    };
    let total = fuel * price;
    Ok(FuelCostResponse {
        fuel_used: round_to(fuel, 2),
        fuel_unit,
        total_cost: cents(total),
        cost_per_distance: if distance > 0.0 { round_to(total / distance, 4) } else { 0.0 },
    })
}

// =============================================================================
// PERCENTAGE
// =============================================================================

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageMode {
    /// a% of b.
    Of,
    /// a is what percent of b.
    IsWhatPercent,
    /// Percent change from a to b.
    Change,
    /// b increased by a%.
    Increase,
    /// b decreased by a%.
    Decrease,
}

#[derive(Debug, Deserialize)]
pub struct PercentageRequest {
    pub mode: PercentageMode,
    #[serde(deserialize_with = "lenient::number")]
    pub a: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub b: f64,
}

#[derive(Debug, Serialize)]
pub struct PercentageResponse {
    pub result: f64,
    pub explanation: String,
}

pub fn percentage(req: PercentageRequest) -> Result<PercentageResponse, ToolError> {
    let PercentageRequest { mode, a, b } = req;
    let (result, explanation) = match mode {
        PercentageMode::Of => {
            let r = a / 100.0 * b;
            (r, format!("{a}% of {b} is {}", round_to(r, 4)))
        }
        PercentageMode::IsWhatPercent => {
            if b == 0.0 {
                return Err(ToolError::invalid("b", "cannot be zero"));
            }
            let r = a / b * 100.0;
            (r, format!("{a} is {}% of {b}", round_to(r, 4)))
        }
        PercentageMode::Change => {
            if a == 0.0 {
                return Err(ToolError::invalid("a", "cannot be zero"));
            }
            let r = (b - a) / a.abs() * 100.0;
            let direction = if r < 0.0 { "decrease" } else { "increase" };
            (r, format!("{a} to {b} is a {}% {direction}", round_to(r.abs(), 4)))
        }
        PercentageMode::Increase => {
            let r = b * (1.0 + a / 100.0);
            (r, format!("{b} increased by {a}% is {}", round_to(r, 4)))
        }
        PercentageMode::Decrease => {
            let r = b * (1.0 - a / 100.0);
            (r, format!("{b} decreased by {a}% is {}", round_to(r, 4)))
        }
    };
    Ok(PercentageResponse { result: round_to(result, 4), explanation })
}

#[cfg(test)]
#[path = "everyday_test.rs"]
mod tests;
