//! Fixed monthly installment for a standard amortizing loan.
//!
//! `monthly = P * i * (1 + i)^n / ((1 + i)^n - 1)` with `i = r / 12`, falling
//! back to `P / n` for zero-interest loans. All math in `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::LendingError;
use crate::products::LoanCategory;
use crate::time_value::{level_payment, monthly_rate};
use crate::types::{percent_to_rate, with_metadata, ComputationOutput, Money, Rate};
use crate::LendingResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Terms longer than this (30 years) are flagged in warnings.
pub(crate) const LONG_TERM_MONTHS: u32 = 360;

/// Annual rates above this percentage are flagged in warnings.
const HIGH_RATE_PERCENT: Decimal = dec!(100);

const METHODOLOGY: &str = "Level-payment amortization, nominal annual rate compounded monthly";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single quote request. Stateless; built per calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanQuoteRequest {
    /// Amount borrowed. Must be positive.
    pub principal: Money,
    /// Nominal annual rate as a percentage (12 = 12%). Must be non-negative.
    pub annual_rate_percent: Rate,
    /// Term in months. Must be at least 1.
    pub term_months: u32,
}

impl LoanQuoteRequest {
    pub fn validate(&self) -> LendingResult<()> {
        validate_terms(self.principal, self.annual_rate_percent, self.term_months)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanQuoteResult {
    pub monthly_payment: Money,
    /// `monthly_payment * term_months`
    pub total_payment: Money,
    /// `total_payment - principal`
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Monthly payment, total payment and total interest for a loan.
///
/// Fails with `InvalidArgument` when `principal <= 0`, `term_months < 1` or
/// `annual_rate_percent < 0`. A zero rate is a valid interest-free loan.
pub fn compute_amortization(
    principal: Money,
    annual_rate_percent: Rate,
    term_months: u32,
) -> LendingResult<LoanQuoteResult> {
    validate_terms(principal, annual_rate_percent, term_months)?;

    let i = monthly_rate(percent_to_rate(annual_rate_percent));
    let monthly_payment = level_payment(principal, i, term_months)?;
    let total_payment = monthly_payment
        .checked_mul(Decimal::from(term_months))
        .ok_or_else(total_overflow)?;
    let total_interest = total_payment - principal;

    debug!(
        %principal,
        %annual_rate_percent,
        term_months,
        %monthly_payment,
        "computed amortization"
    );

    Ok(LoanQuoteResult {
        monthly_payment,
        total_payment,
        total_interest,
    })
}

/// Quote a loan and wrap the result in the standard computation envelope.
pub fn quote_loan(request: &LoanQuoteRequest) -> LendingResult<ComputationOutput<LoanQuoteResult>> {
    let start = Instant::now();

    let result = compute_amortization(
        request.principal,
        request.annual_rate_percent,
        request.term_months,
    )?;
    let warnings = quote_warnings(request.annual_rate_percent, request.term_months);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(METHODOLOGY, request, warnings, elapsed, result))
}

/// Quote a loan at the fixed rate of `category`.
pub fn quote_for_category(
    category: LoanCategory,
    principal: Money,
    term_months: u32,
) -> LendingResult<ComputationOutput<LoanQuoteResult>> {
    let request = LoanQuoteRequest {
        principal,
        annual_rate_percent: category.annual_rate_percent(),
        term_months,
    };
    let mut output = quote_loan(&request)?;
    output.methodology = format!("{METHODOLOGY} ({category} loan rate)");
    Ok(output)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub(crate) fn validate_terms(
    principal: Money,
    annual_rate_percent: Rate,
    term_months: u32,
) -> LendingResult<()> {
    if principal <= Decimal::ZERO {
        return Err(LendingError::invalid("principal", "Principal must be positive"));
    }
    if term_months < 1 {
        return Err(LendingError::invalid(
            "term_months",
            "Term must be at least one month",
        ));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(LendingError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative",
        ));
    }
    Ok(())
}

pub(crate) fn total_overflow() -> LendingError {
    LendingError::invalid("principal", "total payment overflows the decimal range")
}

pub(crate) fn quote_warnings(annual_rate_percent: Rate, term_months: u32) -> Vec<String> {
    let mut warnings = Vec::new();
    if annual_rate_percent > HIGH_RATE_PERCENT {
        warnings.push(format!(
            "Annual rate of {annual_rate_percent}% is unusually high"
        ));
    }
    if term_months > LONG_TERM_MONTHS {
        warnings.push(format!(
            "Term of {term_months} months exceeds {LONG_TERM_MONTHS} months"
        ));
    }
    warnings
}
