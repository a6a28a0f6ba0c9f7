//! Level-payment annuity primitives shared by quotes and schedules.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::LendingError;
use crate::types::{Money, Rate, MONTHS_PER_YEAR};
use crate::LendingResult;

/// Periodic rate for monthly compounding of a nominal annual rate.
pub fn monthly_rate(annual_rate: Rate) -> Rate {
    annual_rate / MONTHS_PER_YEAR
}

/// `(1 + i)^n`, rejecting combinations that overflow the decimal range.
pub fn growth_factor(periodic_rate: Rate, periods: u32) -> LendingResult<Decimal> {
    (Decimal::ONE + periodic_rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| {
            LendingError::invalid(
                "annual_rate_percent",
                format!("growth factor overflows over {periods} periods"),
            )
        })
}

/// Fixed installment that repays `principal` over `periods` at `periodic_rate`.
///
/// A zero rate degenerates to straight-line repayment, `principal / periods`.
pub fn level_payment(principal: Money, periodic_rate: Rate, periods: u32) -> LendingResult<Money> {
    if periods == 0 {
        return Err(LendingError::invalid(
            "term_months",
            "Number of periods must be > 0",
        ));
    }

    let n = Decimal::from(periods);
    if periodic_rate.is_zero() {
        return Ok(principal / n);
    }

    let factor = growth_factor(periodic_rate, periods)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(LendingError::DivisionByZero {
            context: "level payment annuity factor".into(),
        });
    }

    principal
        .checked_mul(periodic_rate)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| LendingError::invalid("principal", "installment overflows the decimal range"))
}
