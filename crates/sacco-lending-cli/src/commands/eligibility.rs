use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use sacco_lending_core::application::{self, LoanApplication};
use sacco_lending_core::{max_eligible_loan, LendingPolicy};

use crate::input;

/// Arguments for the savings-based borrowing limit
#[derive(Args)]
pub struct EligibilityArgs {
    /// Member's total savings balance
    #[arg(long)]
    pub savings: Decimal,

    /// Savings multiplier (defaults to the policy's, normally 3)
    #[arg(long)]
    pub multiplier: Option<Decimal>,
}

/// Arguments for assessing a loan application
#[derive(Args)]
pub struct AssessArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan category: personal, business, emergency
    #[arg(long)]
    pub category: Option<String>,

    /// Requested loan amount
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Member's total savings balance
    #[arg(long)]
    pub savings: Option<Decimal>,

    /// Months of membership
    #[arg(long)]
    pub membership_months: Option<u32>,

    /// Monthly income, for the payment-to-income ratio
    #[arg(long)]
    pub monthly_income: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize)]
struct EligibilityOutput {
    total_savings: Decimal,
    multiplier: Decimal,
    max_eligible_loan: Decimal,
}

pub fn run_eligibility(
    args: EligibilityArgs,
    policy: &LendingPolicy,
) -> Result<Value, Box<dyn std::error::Error>> {
    let multiplier = args.multiplier.unwrap_or(policy.savings_multiplier);
    let max_loan = max_eligible_loan(args.savings, multiplier)?;

    Ok(serde_json::to_value(EligibilityOutput {
        total_savings: args.savings,
        multiplier,
        max_eligible_loan: max_loan,
    })?)
}

pub fn run_assess(
    args: AssessArgs,
    policy: &LendingPolicy,
) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_application: LoanApplication =
        match input::read_input::<LoanApplication>(args.input.as_deref())? {
            Some(parsed) => parsed,
            None => LoanApplication {
                category: args
                    .category
                    .as_deref()
                    .ok_or("--category is required (or provide --input)")?
                    .parse()?,
                requested_amount: args
                    .amount
                    .ok_or("--amount is required (or provide --input)")?,
                term_months: args
                    .term_months
                    .ok_or("--term-months is required (or provide --input)")?,
                total_savings: args
                    .savings
                    .ok_or("--savings is required (or provide --input)")?,
                membership_months: args.membership_months,
                monthly_income: args.monthly_income,
            },
        };

    let result = application::assess_application(&loan_application, policy)?;
    Ok(serde_json::to_value(result)?)
}
