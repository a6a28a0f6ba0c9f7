#![cfg(feature = "application")]

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sacco_lending_core::application::{
    assess_application, AssessmentDecision, LoanApplication,
};
use sacco_lending_core::{
    max_eligible_loan, LendingPolicy, LoanCategory, OverEligibilityAction,
    DEFAULT_SAVINGS_MULTIPLIER,
};

// ===========================================================================
// Savings multiple
// ===========================================================================

#[test]
fn test_eligibility_examples() {
    assert_eq!(max_eligible_loan(dec!(125000), dec!(3)).unwrap(), dec!(375000));
    assert_eq!(max_eligible_loan(Decimal::ZERO, dec!(3)).unwrap(), Decimal::ZERO);
    assert_eq!(DEFAULT_SAVINGS_MULTIPLIER, dec!(3));
}

// ===========================================================================
// Application assessment
// ===========================================================================

fn application(category: LoanCategory, amount: Decimal, term: u32, savings: Decimal) -> LoanApplication {
    LoanApplication {
        category,
        requested_amount: amount,
        term_months: term,
        total_savings: savings,
        membership_months: Some(12),
        monthly_income: None,
    }
}

#[test]
fn test_over_eligibility_is_referred_by_default() {
    // 20,000 savings -> 60,000 limit
    let app = application(LoanCategory::Personal, dec!(80000), 12, dec!(20000));
    let a = assess_application(&app, &LendingPolicy::default()).unwrap().result;

    assert_eq!(a.decision, AssessmentDecision::Referred);
    assert_eq!(a.reasons.len(), 1);
    assert_eq!(a.max_eligible_loan, dec!(60000));
    assert_eq!(a.eligibility_headroom, dec!(-20000));
}

#[test]
fn test_over_eligibility_rejects_under_strict_policy() {
    let policy = LendingPolicy {
        over_eligibility: OverEligibilityAction::Reject,
        ..LendingPolicy::default()
    };
    let app = application(LoanCategory::Personal, dec!(80000), 12, dec!(20000));
    let a = assess_application(&app, &policy).unwrap().result;
    assert_eq!(a.decision, AssessmentDecision::Rejected);
}

#[test]
fn test_product_limits_reject_and_collect_every_reason() {
    // Emergency: max 100,000, 1-12 months, min savings 5,000
    let app = application(LoanCategory::Emergency, dec!(150000), 18, dec!(1000));
    let a = assess_application(&app, &LendingPolicy::default()).unwrap().result;

    assert_eq!(a.decision, AssessmentDecision::Rejected);
    // amount, term, savings, and the savings-multiple limit
    assert_eq!(a.reasons.len(), 4);
}

#[test]
fn test_short_membership_rejected() {
    let mut app = application(LoanCategory::Business, dec!(300000), 24, dec!(200000));
    app.membership_months = Some(2);
    let a = assess_application(&app, &LendingPolicy::default()).unwrap().result;
    assert_eq!(a.decision, AssessmentDecision::Rejected);
    assert!(a.reasons[0].contains("Membership"));
}

#[test]
fn test_business_loan_quote_uses_product_rate() {
    let app = application(LoanCategory::Business, dec!(150000), 12, dec!(100000));
    let a = assess_application(&app, &LendingPolicy::default()).unwrap().result;
    assert_eq!(a.decision, AssessmentDecision::Approved);
    assert_eq!(a.product.annual_rate_percent, dec!(10));
    assert!((a.quote.monthly_payment - dec!(13187.38)).abs() < dec!(0.01));
}

#[test]
fn test_policy_override_of_multiplier() {
    let policy = LendingPolicy::from_json(r#"{"savings_multiplier": "5"}"#).unwrap();
    let app = application(LoanCategory::Personal, dec!(90000), 12, dec!(20000));
    let a = assess_application(&app, &policy).unwrap().result;
    assert_eq!(a.max_eligible_loan, dec!(100000));
    assert_eq!(a.decision, AssessmentDecision::Approved);
}

#[test]
fn test_application_json_round_trip_from_form_fields() {
    let json = r#"{
        "category": "emergency",
        "requested_amount": "20000",
        "term_months": 6,
        "total_savings": "10000"
    }"#;
    let app: LoanApplication = serde_json::from_str(json).unwrap();
    let out = assess_application(&app, &LendingPolicy::default()).unwrap();
    assert_eq!(out.result.decision, AssessmentDecision::Approved);
    assert!(out.warnings.is_empty());
}
