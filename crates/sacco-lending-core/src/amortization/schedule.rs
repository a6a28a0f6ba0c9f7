//! Period-by-period repayment table for a level-payment loan.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::quote::{quote_warnings, total_overflow, validate_terms};
use crate::error::LendingError;
use crate::time_value::{level_payment, monthly_rate};
use crate::types::{percent_to_rate, with_metadata, ComputationOutput, Money, Rate};
use crate::LendingResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub principal: Money,
    /// Nominal annual rate as a percentage (12 = 12%).
    pub annual_rate_percent: Rate,
    pub term_months: u32,
    /// Due date of the first installment; later installments fall monthly after it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based installment number.
    pub period: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub monthly_payment: Money,
    pub rows: Vec<ScheduleRow>,
    pub total_payment: Money,
    pub total_interest: Money,
    pub total_principal: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the full repayment schedule. The final installment absorbs any
/// rounding residue so the loan closes at exactly zero.
pub fn build_schedule(
    input: &ScheduleInput,
) -> LendingResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    validate_terms(input.principal, input.annual_rate_percent, input.term_months)?;
    let warnings = quote_warnings(input.annual_rate_percent, input.term_months);

    let i = monthly_rate(percent_to_rate(input.annual_rate_percent));
    let monthly_payment = level_payment(input.principal, i, input.term_months)?;

    let mut rows = Vec::with_capacity(input.term_months as usize);
    let mut balance = input.principal;
    let mut total_payment = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;

    for period in 1..=input.term_months {
        let opening_balance = balance;
        let interest = opening_balance.checked_mul(i).ok_or_else(total_overflow)?;
        let (payment, principal) = if period == input.term_months {
            let settlement = interest
                .checked_add(opening_balance)
                .ok_or_else(total_overflow)?;
            (settlement, opening_balance)
        } else {
            (monthly_payment, monthly_payment - interest)
        };
        balance = if period == input.term_months {
            Decimal::ZERO
        } else {
            opening_balance - principal
        };

        total_payment = total_payment.checked_add(payment).ok_or_else(total_overflow)?;
        total_interest = total_interest.checked_add(interest).ok_or_else(total_overflow)?;
        total_principal = total_principal
            .checked_add(principal)
            .ok_or_else(total_overflow)?;

        rows.push(ScheduleRow {
            period,
            payment_date: payment_date(input.first_payment_date, period)?,
            opening_balance,
            payment,
            interest,
            principal,
            closing_balance: balance,
        });
    }

    debug!(
        principal = %input.principal,
        term_months = input.term_months,
        %total_interest,
        "built amortization schedule"
    );

    let schedule = AmortizationSchedule {
        monthly_payment,
        rows,
        total_payment,
        total_interest,
        total_principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization schedule, final installment settles residual balance",
        input,
        warnings,
        elapsed,
        schedule,
    ))
}

fn payment_date(first: Option<NaiveDate>, period: u32) -> LendingResult<Option<NaiveDate>> {
    let Some(first) = first else {
        return Ok(None);
    };
    first
        .checked_add_months(Months::new(period - 1))
        .map(Some)
        .ok_or_else(|| {
            LendingError::invalid(
                "first_payment_date",
                format!("installment {period} falls outside the supported date range"),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(principal: Money, rate: Rate, term: u32) -> ScheduleInput {
        ScheduleInput {
            principal,
            annual_rate_percent: rate,
            term_months: term,
            first_payment_date: None,
        }
    }

    #[test]
    fn test_schedule_has_one_row_per_month() {
        let out = build_schedule(&input(dec!(50000), dec!(12), 12)).unwrap();
        assert_eq!(out.result.rows.len(), 12);
        assert_eq!(out.result.rows[0].period, 1);
        assert_eq!(out.result.rows[11].period, 12);
    }

    #[test]
    fn test_first_row_interest_is_one_month_on_principal() {
        let out = build_schedule(&input(dec!(50000), dec!(12), 12)).unwrap();
        let first = &out.result.rows[0];
        assert_eq!(first.opening_balance, dec!(50000));
        assert_eq!(first.interest, dec!(500));
        assert_eq!(first.principal, first.payment - first.interest);
    }

    #[test]
    fn test_schedule_closes_at_zero() {
        let out = build_schedule(&input(dec!(150000), dec!(10), 12)).unwrap();
        let last = out.result.rows.last().unwrap();
        assert_eq!(last.closing_balance, Decimal::ZERO);
        assert!((out.result.total_principal - dec!(150000)).abs() < dec!(0.000001));
        assert!((last.payment - out.result.monthly_payment).abs() < dec!(0.000001));
    }

    #[test]
    fn test_balances_chain_between_rows() {
        let out = build_schedule(&input(dec!(100000), dec!(8), 6)).unwrap();
        for pair in out.result.rows.windows(2) {
            assert_eq!(pair[0].closing_balance, pair[1].opening_balance);
            assert!(pair[1].interest < pair[0].interest);
        }
    }

    #[test]
    fn test_payment_dates_roll_monthly() {
        let mut inp = input(dec!(3000), dec!(0), 3);
        inp.first_payment_date = NaiveDate::from_ymd_opt(2025, 1, 31);
        let out = build_schedule(&inp).unwrap();
        let dates: Vec<_> = out.result.rows.iter().map(|r| r.payment_date.unwrap()).collect();
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        assert_eq!(dates[2], NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
    }

    #[test]
    fn test_zero_rate_schedule_has_no_interest() {
        let out = build_schedule(&input(dec!(3000), dec!(0), 3)).unwrap();
        assert_eq!(out.result.total_interest, Decimal::ZERO);
        assert_eq!(out.result.total_payment, dec!(3000));
        assert!(out.result.rows.iter().all(|r| r.payment == dec!(1000)));
    }

    #[test]
    fn test_long_term_is_flagged() {
        let out = build_schedule(&input(dec!(250000), dec!(6), 480)).unwrap();
        assert_eq!(out.result.rows.len(), 480);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("480 months"));
    }

    #[test]
    fn test_standard_term_has_no_warnings() {
        let out = build_schedule(&input(dec!(250000), dec!(6), 360)).unwrap();
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_totals_beyond_decimal_range_are_invalid() {
        let result = build_schedule(&input(dec!(79_000_000_000_000_000_000_000_000_000), dec!(12), 2));
        assert!(matches!(result, Err(LendingError::InvalidArgument { .. })));
    }

    #[test]
    fn test_invalid_term_rejected() {
        assert!(build_schedule(&input(dec!(3000), dec!(5), 0)).is_err());
    }
}
