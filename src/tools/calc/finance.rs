//! Mortgage, loan and compound interest calculators.
//!
//! All three share the standard amortized payment formula
//! `P * r / (1 - (1 + r)^-n)` with a monthly rate `r`; a zero rate degrades
//! to straight-line repayment.

use serde::{Deserialize, Serialize};

use crate::tools::{ToolError, cents, lenient, require_non_negative, require_positive, round_to};

const MAX_TERM_MONTHS: u32 = 1200;

// =============================================================================
// AMORTIZATION
// =============================================================================

/// Fixed monthly payment for an amortized loan.
#[must_use]
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, months: u32) -> f64 {
    let rate = annual_rate_percent / 100.0 / 12.0;
    let n = f64::from(months);
    if rate.abs() < f64::EPSILON {
        principal / n
    } else {
        principal * rate / (1.0 - (1.0 + rate).powf(-n))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentRow {
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

/// Month-by-month schedule. The final payment absorbs rounding drift so the
/// balance closes at exactly zero.
fn amortize(principal: f64, annual_rate_percent: f64, months: u32) -> Vec<PaymentRow> {
    let rate = annual_rate_percent / 100.0 / 12.0;
    let payment = monthly_payment(principal, annual_rate_percent, months);
    let mut balance = principal;
    let mut rows = Vec::with_capacity(months as usize);

    for month in 1..=months {
        let interest = balance * rate;
        let mut principal_part = payment - interest;
        if month == months || principal_part > balance {
            principal_part = balance;
        }
        balance -= principal_part;
        rows.push(PaymentRow {
            month,
            payment: principal_part + interest,
            principal: principal_part,
            interest,
            balance: balance.max(0.0),
        });
    }
    rows
}

fn rounded_row(row: &PaymentRow) -> PaymentRow {
    PaymentRow {
        month: row.month,
        payment: cents(row.payment),
        principal: cents(row.principal),
        interest: cents(row.interest),
        balance: cents(row.balance),
    }
}

fn validate_term(field: &'static str, months: u32) -> Result<u32, ToolError> {
    if months == 0 || months > MAX_TERM_MONTHS {
        return Err(ToolError::invalid(field, format!("term must be between 1 and {MAX_TERM_MONTHS} months")));
    }
    Ok(months)
}

// =============================================================================
// MORTGAGE
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct MortgageRequest {
    #[serde(deserialize_with = "lenient::number")]
    pub home_price: f64,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub down_payment: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub annual_rate: f64,
    #[serde(deserialize_with = "lenient::count")]
    pub years: u32,
    /// Annual property tax.
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub property_tax: Option<f64>,
    /// Annual home insurance.
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub insurance: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct YearSummary {
    pub year: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub balance: f64,
}

#[derive(Debug, Serialize)]
pub struct MortgageResponse {
    pub loan_amount: f64,
    pub monthly_principal_and_interest: f64,
    pub monthly_tax: f64,
    pub monthly_insurance: f64,
    pub monthly_total: f64,
    pub total_interest: f64,
    pub total_paid: f64,
    pub schedule: Vec<YearSummary>,
}

pub fn mortgage(req: MortgageRequest) -> Result<MortgageResponse, ToolError> {
    let price = require_positive("home_price", req.home_price)?;
    let down = require_non_negative("down_payment", req.down_payment.unwrap_or(0.0))?;
    if down >= price {
        return Err(ToolError::invalid("down_payment", "must be less than the home price"));
    }
    let rate = require_non_negative("annual_rate", req.annual_rate)?;
    let months = validate_term("years", req.years.saturating_mul(12))?;
    let tax = require_non_negative("property_tax", req.property_tax.unwrap_or(0.0))? / 12.0;
    let insurance = require_non_negative("insurance", req.insurance.unwrap_or(0.0))? / 12.0;

    let principal = price - down;
    let payment = monthly_payment(principal, rate, months);
    let rows = amortize(principal, rate, months);

    let schedule = rows
        .chunks(12)
        .zip(1..)
        .map(|(chunk, year)| YearSummary {
            year,
            principal_paid: cents(chunk.iter().map(|r| r.principal).sum()),
            interest_paid: cents(chunk.iter().map(|r| r.interest).sum()),
            balance: cents(chunk.last().map_or(0.0, |r| r.balance)),
        })
        .collect();
    let total_interest: f64 = rows.iter().map(|r| r.interest).sum();

    Ok(MortgageResponse {
        loan_amount: cents(principal),
        monthly_principal_and_interest: cents(payment),
        monthly_tax: cents(tax),
        monthly_insurance: cents(insurance),
        monthly_total: cents(payment + tax + insurance),
        total_interest: cents(total_interest),
        total_paid: cents(principal + total_interest),
        schedule,
    })
}

// =============================================================================
// LOAN
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoanRequest {
    #[serde(deserialize_with = "lenient::number")]
    pub amount: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub annual_rate: f64,
    #[serde(deserialize_with = "lenient::count")]
    pub months: u32,
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    pub schedule: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct LoanResponse {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<PaymentRow>>,
}

pub fn loan(req: LoanRequest) -> Result<LoanResponse, ToolError> {
    let amount = require_positive("amount", req.amount)?;
    let rate = require_non_negative("annual_rate", req.annual_rate)?;
    let months = validate_term("months", req.months)?;

    let rows = amortize(amount, rate, months);
    let total_interest: f64 = rows.iter().map(|r| r.interest).sum();

    Ok(LoanResponse {
        monthly_payment: cents(monthly_payment(amount, rate, months)),
        total_payment: cents(amount + total_interest),
        total_interest: cents(total_interest),
        schedule: req.schedule.unwrap_or(false).then(|| rows.iter().map(rounded_row).collect()),
    })
}

// =============================================================================
// COMPOUND INTEREST
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CompoundInterestRequest {
    #[serde(deserialize_with = "lenient::number")]
    pub principal: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub annual_rate: f64,
    #[serde(deserialize_with = "lenient::count")]
    pub years: u32,
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub compounds_per_year: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub monthly_contribution: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct YearBalance {
    pub year: u32,
    pub balance: f64,
    pub contributions: f64,
    pub interest: f64,
}

#[derive(Debug, Serialize)]
pub struct CompoundInterestResponse {
    pub final_balance: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub effective_annual_rate: f64,
    pub yearly: Vec<YearBalance>,
}

pub fn compound_interest(req: CompoundInterestRequest) -> Result<CompoundInterestResponse, ToolError> {
    let principal = require_non_negative("principal", req.principal)?;
    let rate = require_non_negative("annual_rate", req.annual_rate)? / 100.0;
    if req.years == 0 || req.years > MAX_TERM_MONTHS / 12 {
        return Err(ToolError::invalid("years", format!("must be between 1 and {}", MAX_TERM_MONTHS / 12)));
    }
    let periods = req.compounds_per_year.unwrap_or(12);
    if periods == 0 || periods > 365 {
        return Err(ToolError::invalid("compounds_per_year", "must be between 1 and 365"));
    }
    let contribution = require_non_negative("monthly_contribution", req.monthly_contribution.unwrap_or(0.0))?;

    let n = f64::from(periods);
    // Per-month growth equivalent to compounding `n` times a year.
    let monthly_growth = (1.0 + rate / n).powf(n / 12.0) - 1.0;

    let yearly = (1..=req.years)
        .map(|year| {
            let t = f64::from(year);
            let months = t * 12.0;
            let lump = principal * (1.0 + rate / n).powf(n * t);
            let annuity = if monthly_growth.abs() < f64::EPSILON {
                contribution * months
            } else {
                contribution * ((1.0 + monthly_growth).powf(months) - 1.0) / monthly_growth
            };
            let balance = lump + annuity;
            let contributions = principal + contribution * months;
            YearBalance {
                year,
                balance: cents(balance),
                contributions: cents(contributions),
                interest: cents(balance - contributions),
            }
        })
        .collect::<Vec<_>>();

    let (final_balance, total_contributions, total_interest) = yearly
        .last()
        .map(|y| (y.balance, y.contributions, y.interest))
        .ok_or_else(|| ToolError::invalid("years", "must be at least 1"))?;

    Ok(CompoundInterestResponse {
        final_balance,
        total_contributions,
        total_interest,
        effective_annual_rate: round_to(((1.0 + rate / n).powf(n) - 1.0) * 100.0, 4),
        yearly,
    })
}

#[cfg(test)]
#[path = "finance_test.rs"]
mod tests;
