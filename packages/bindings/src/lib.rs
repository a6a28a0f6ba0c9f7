use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use sacco_lending_core::amortization::schedule::{build_schedule, ScheduleInput};
use sacco_lending_core::application::LoanApplication;
use sacco_lending_core::{LendingPolicy, LoanQuoteRequest};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

/// Bare quote: `{ monthly_payment, total_payment, total_interest }`.
#[napi]
pub fn compute_amortization(input_json: String) -> NapiResult<String> {
    let input: LoanQuoteRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = sacco_lending_core::compute_amortization(
        input.principal,
        input.annual_rate_percent,
        input.term_months,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Quote inside the computation envelope.
#[napi]
pub fn quote_loan(input_json: String) -> NapiResult<String> {
    let input: LoanQuoteRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = sacco_lending_core::quote_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: ScheduleInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = build_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Eligibility
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct EligibilityRequest {
    total_savings: Decimal,
    #[serde(default)]
    multiplier: Option<Decimal>,
}

/// Returns the maximum eligible loan as a decimal string.
#[napi]
pub fn max_eligible_loan(input_json: String) -> NapiResult<String> {
    let input: EligibilityRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let multiplier = input
        .multiplier
        .unwrap_or(sacco_lending_core::DEFAULT_SAVINGS_MULTIPLIER);
    let max_loan = sacco_lending_core::max_eligible_loan(input.total_savings, multiplier)
        .map_err(to_napi_error)?;
    Ok(max_loan.to_string())
}

/// Assess an application; `policy_json` falls back to the default policy.
#[napi]
pub fn assess_application(input_json: String, policy_json: Option<String>) -> NapiResult<String> {
    let input: LoanApplication = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let policy = match policy_json {
        Some(json) => LendingPolicy::from_json(&json).map_err(to_napi_error)?,
        None => LendingPolicy::default(),
    };
    let output = sacco_lending_core::application::assess_application(&input, &policy)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn loan_products() -> NapiResult<String> {
    serde_json::to_string(&sacco_lending_core::loan_products()).map_err(to_napi_error)
}
