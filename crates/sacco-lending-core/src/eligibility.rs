use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::error::LendingError;
use crate::types::{Money, Multiple};
use crate::LendingResult;

/// Members may borrow up to three times their savings.
pub const DEFAULT_SAVINGS_MULTIPLIER: Multiple = dec!(3);

/// Maximum loan a member may request given their total savings:
/// `total_savings * multiplier`.
pub fn max_eligible_loan(total_savings: Money, multiplier: Multiple) -> LendingResult<Money> {
    if total_savings < Decimal::ZERO {
        return Err(LendingError::invalid(
            "total_savings",
            "Savings balance cannot be negative",
        ));
    }
    if multiplier < Decimal::ZERO {
        return Err(LendingError::invalid(
            "multiplier",
            "Savings multiplier cannot be negative",
        ));
    }

    let max_loan = total_savings
        .checked_mul(multiplier)
        .ok_or_else(|| LendingError::invalid("total_savings", "eligible amount overflows"))?;
    debug!(%total_savings, %multiplier, %max_loan, "computed loan eligibility");
    Ok(max_loan)
}
