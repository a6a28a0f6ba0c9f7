pub mod amortization;
pub mod eligibility;
pub mod error;
pub mod policy;
pub mod products;
pub mod time_value;
pub mod types;

#[cfg(feature = "application")]
pub mod application;

pub use amortization::quote::{
    compute_amortization, quote_for_category, quote_loan, LoanQuoteRequest, LoanQuoteResult,
};
pub use eligibility::{max_eligible_loan, DEFAULT_SAVINGS_MULTIPLIER};
pub use error::LendingError;
pub use policy::{LendingPolicy, OverEligibilityAction};
pub use products::{annual_rate_percent, loan_products, LoanCategory, LoanProduct};
pub use types::*;

/// Standard result type for all lending operations
pub type LendingResult<T> = Result<T, LendingError>;
