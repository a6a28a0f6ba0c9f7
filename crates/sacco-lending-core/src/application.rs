//! Loan application assessment.
//!
//! Applies the product terms and the savings-based eligibility limit to a
//! member's application and returns a decision with every reason that led
//! to it, alongside a quote at the product rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::amortization::quote::{compute_amortization, LoanQuoteResult};
use crate::eligibility::max_eligible_loan;
use crate::error::LendingError;
use crate::policy::{LendingPolicy, OverEligibilityAction};
use crate::products::{LoanCategory, LoanProduct};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LendingResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanApplication {
    pub category: LoanCategory,
    pub requested_amount: Money,
    pub term_months: u32,
    /// Member's total savings balance.
    pub total_savings: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<Money>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentDecision {
    Approved,
    /// Needs manual review by the loan committee.
    Referred,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationAssessment {
    pub decision: AssessmentDecision,
    /// Every failed check, in evaluation order. Empty when approved.
    pub reasons: Vec<String>,
    pub product: LoanProduct,
    pub max_eligible_loan: Money,
    /// `max_eligible_loan - requested_amount`; negative when over the limit.
    pub eligibility_headroom: Money,
    pub quote: LoanQuoteResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_to_income: Option<Rate>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Assess an application against `policy`.
///
/// Product limits (amount, term, minimum savings, membership tenure) are hard
/// checks and reject. Exceeding the savings-based limit follows the policy's
/// `over_eligibility` action.
pub fn assess_application(
    application: &LoanApplication,
    policy: &LendingPolicy,
) -> LendingResult<ComputationOutput<ApplicationAssessment>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_application(application)?;
    let product = policy.product(application.category)?;

    let mut rejections: Vec<String> = Vec::new();
    let mut referrals: Vec<String> = Vec::new();

    // -- Product terms --------------------------------------------------------
    if application.requested_amount > product.max_amount {
        rejections.push(format!(
            "Requested amount {} exceeds the {} loan maximum of {}",
            application.requested_amount, product.category, product.max_amount
        ));
    }
    if !product.term_in_range(application.term_months) {
        rejections.push(format!(
            "Term of {} months is outside the {} loan range of {}-{} months",
            application.term_months,
            product.category,
            product.min_term_months,
            product.max_term_months
        ));
    }
    if let Some(min_savings) = product.min_savings {
        if application.total_savings < min_savings {
            rejections.push(format!(
                "Savings balance {} is below the required {}",
                application.total_savings, min_savings
            ));
        }
    }
    match (product.min_membership_months, application.membership_months) {
        (Some(required), Some(actual)) if actual < required => {
            rejections.push(format!(
                "Membership of {actual} months is below the required {required} months"
            ));
        }
        (Some(required), None) => warnings.push(format!(
            "Membership tenure not supplied; {required}-month requirement not checked"
        )),
        _ => {}
    }

    // -- Savings-based eligibility --------------------------------------------
    let max_loan = max_eligible_loan(application.total_savings, policy.savings_multiplier)?;
    let headroom = max_loan - application.requested_amount;
    if headroom < Decimal::ZERO {
        let reason = format!(
            "Requested amount {} exceeds savings-based eligibility of {} ({}x savings)",
            application.requested_amount, max_loan, policy.savings_multiplier
        );
        match policy.over_eligibility {
            OverEligibilityAction::Refer => referrals.push(reason),
            OverEligibilityAction::Reject => rejections.push(reason),
        }
    }

    // -- Quote at the product rate ---------------------------------------------
    let quote = compute_amortization(
        application.requested_amount,
        product.annual_rate_percent,
        application.term_months,
    )?;
    let payment_to_income = application
        .monthly_income
        .map(|income| {
            quote.monthly_payment.checked_div(income).ok_or_else(|| {
                LendingError::invalid(
                    "monthly_income",
                    "payment-to-income ratio overflows the decimal range",
                )
            })
        })
        .transpose()?;

    let decision = if !rejections.is_empty() {
        AssessmentDecision::Rejected
    } else if !referrals.is_empty() {
        AssessmentDecision::Referred
    } else {
        AssessmentDecision::Approved
    };

    let mut reasons = rejections;
    reasons.extend(referrals);
    if decision == AssessmentDecision::Approved {
        debug!(category = %application.category, amount = %application.requested_amount, "application approved");
    } else {
        warn!(
            category = %application.category,
            amount = %application.requested_amount,
            ?decision,
            reasons = reasons.len(),
            "application not approved"
        );
    }

    let assessment = ApplicationAssessment {
        decision,
        reasons,
        product: product.clone(),
        max_eligible_loan: max_loan,
        eligibility_headroom: headroom,
        quote,
        payment_to_income,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Product limits as hard checks; savings-multiple eligibility per policy",
        application,
        warnings,
        elapsed,
        assessment,
    ))
}

fn validate_application(application: &LoanApplication) -> LendingResult<()> {
    if application.requested_amount <= Decimal::ZERO {
        return Err(LendingError::invalid(
            "requested_amount",
            "Requested amount must be positive",
        ));
    }
    if application.term_months == 0 {
        return Err(LendingError::invalid(
            "term_months",
            "Term must be at least one month",
        ));
    }
    if application.total_savings < Decimal::ZERO {
        return Err(LendingError::invalid(
            "total_savings",
            "Savings balance cannot be negative",
        ));
    }
    if application.monthly_income.is_some_and(|m| m <= Decimal::ZERO) {
        return Err(LendingError::invalid(
            "monthly_income",
            "Monthly income must be positive when supplied",
        ));
    }
    Ok(())
}
