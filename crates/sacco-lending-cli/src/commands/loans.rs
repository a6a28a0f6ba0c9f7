use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use sacco_lending_core::amortization::schedule::{self, ScheduleInput};
use sacco_lending_core::{quote_for_category, quote_loan, LoanCategory, LoanQuoteRequest};

use crate::input;

/// Principal, rate and term shared by `quote` and `schedule`.
#[derive(Args)]
pub struct LoanTermsArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 12 for 12%)
    #[arg(long, conflicts_with = "category")]
    pub rate: Option<Decimal>,

    /// Loan category whose fixed rate applies: personal, business, emergency
    #[arg(long)]
    pub category: Option<String>,

    /// Term in months
    #[arg(long, alias = "months")]
    pub term_months: Option<u32>,
}

/// Arguments for a loan quote
#[derive(Args)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub terms: LoanTermsArgs,
}

/// Arguments for a repayment schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub terms: LoanTermsArgs,

    /// Due date of the first installment (YYYY-MM-DD)
    #[arg(long)]
    pub first_payment_date: Option<NaiveDate>,
}

impl LoanTermsArgs {
    fn principal(&self) -> Result<Decimal, Box<dyn std::error::Error>> {
        Ok(self
            .principal
            .ok_or("--principal is required (or provide --input)")?)
    }

    fn term_months(&self) -> Result<u32, Box<dyn std::error::Error>> {
        Ok(self
            .term_months
            .ok_or("--term-months is required (or provide --input)")?)
    }

    /// Annual rate percent from `--rate`, or the fixed rate of `--category`.
    fn rate_percent(&self) -> Result<Decimal, Box<dyn std::error::Error>> {
        match (self.rate, self.category.as_deref()) {
            (Some(rate), _) => Ok(rate),
            (None, Some(tag)) => Ok(tag.parse::<LoanCategory>()?.annual_rate_percent()),
            (None, None) => Err("--rate or --category is required (or provide --input)".into()),
        }
    }
}

pub fn run_quote(args: QuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = &args.terms;
    if let Some(request) = input::read_input::<LoanQuoteRequest>(terms.input.as_deref())? {
        return Ok(serde_json::to_value(quote_loan(&request)?)?);
    }

    let principal = terms.principal()?;
    let term_months = terms.term_months()?;
    let result = match (terms.rate, terms.category.as_deref()) {
        (None, Some(tag)) => quote_for_category(tag.parse()?, principal, term_months)?,
        _ => quote_loan(&LoanQuoteRequest {
            principal,
            annual_rate_percent: terms.rate_percent()?,
            term_months,
        })?,
    };
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = &args.terms;
    let schedule_input: ScheduleInput =
        match input::read_input::<ScheduleInput>(terms.input.as_deref())? {
            Some(parsed) => parsed,
            None => ScheduleInput {
                principal: terms.principal()?,
                annual_rate_percent: terms.rate_percent()?,
                term_months: terms.term_months()?,
                first_payment_date: args.first_payment_date,
            },
        };

    let result = schedule::build_schedule(&schedule_input)?;
    Ok(serde_json::to_value(result)?)
}
