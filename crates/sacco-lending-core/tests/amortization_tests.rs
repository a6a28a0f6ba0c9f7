use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sacco_lending_core::amortization::schedule::{build_schedule, ScheduleInput};
use sacco_lending_core::{
    annual_rate_percent, compute_amortization, quote_for_category, LendingError, LoanCategory,
};

fn rel_err(a: Decimal, b: Decimal) -> Decimal {
    if b.is_zero() {
        a.abs()
    } else {
        ((a - b) / b).abs()
    }
}

fn close(actual: Decimal, expected: Decimal, tol: Decimal) -> bool {
    (actual - expected).abs() <= tol
}

// ===========================================================================
// Worked examples at each product rate
// ===========================================================================

#[test]
fn test_personal_rate_example() {
    let q = compute_amortization(dec!(50000), annual_rate_percent("personal").unwrap(), 12).unwrap();
    assert!(close(q.monthly_payment, dec!(4442.44), dec!(0.01)), "{}", q.monthly_payment);
    assert!(close(q.total_payment, dec!(53309.27), dec!(0.01)), "{}", q.total_payment);
    assert!(close(q.total_interest, dec!(3309.27), dec!(0.01)), "{}", q.total_interest);
}

#[test]
fn test_business_rate_example() {
    let out = quote_for_category(LoanCategory::Business, dec!(150000), 12).unwrap();
    assert!(close(out.result.monthly_payment, dec!(13187.38), dec!(0.01)));
}

#[test]
fn test_emergency_rate_example_matches_formula() {
    let q = compute_amortization(dec!(100000), dec!(8), 6).unwrap();

    // Evaluate the closed form independently: i = 0.08 / 12, n = 6
    let i = dec!(0.08) / dec!(12);
    let mut growth = Decimal::ONE;
    for _ in 0..6 {
        growth *= Decimal::ONE + i;
    }
    let expected = dec!(100000) * i * growth / (growth - Decimal::ONE);

    assert!(rel_err(q.monthly_payment, expected) < dec!(0.000000001));
    assert!(close(q.monthly_payment, dec!(17057.71), dec!(0.01)));
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_zero_interest_is_principal_over_term() {
    for (p, n) in [(dec!(100), 3), (dec!(50000), 7), (dec!(1), 1), (dec!(999999.99), 60)] {
        let q = compute_amortization(p, Decimal::ZERO, n).unwrap();
        assert!(rel_err(q.monthly_payment, p / Decimal::from(n)) < dec!(0.000000001));
        assert!(q.total_interest.abs() < dec!(0.0000001), "interest {}", q.total_interest);
    }
}

#[test]
fn test_totals_are_consistent() {
    for (p, r, n) in [
        (dec!(50000), dec!(12), 12),
        (dec!(2000000), dec!(10), 60),
        (dec!(1234.56), dec!(8), 5),
        (dec!(75000), dec!(0.5), 360),
    ] {
        let q = compute_amortization(p, r, n).unwrap();
        let expected_total = q.monthly_payment * Decimal::from(n);
        assert!(rel_err(q.total_payment, expected_total) < dec!(0.000000001));
        assert!(close(q.total_interest, q.total_payment - p, dec!(0.000001)));
        assert!(q.total_interest >= Decimal::ZERO);
    }
}

#[test]
fn test_payment_increases_with_rate() {
    let mut previous = Decimal::MIN;
    for rate in [dec!(0), dec!(0.5), dec!(4), dec!(8), dec!(10), dec!(12), dec!(24), dec!(36)] {
        let q = compute_amortization(dec!(80000), rate, 24).unwrap();
        assert!(q.monthly_payment > previous, "payment at {rate}% did not increase");
        previous = q.monthly_payment;
    }
}

#[test]
fn test_single_payment_term() {
    let q = compute_amortization(dec!(40000), dec!(12), 1).unwrap();
    // P * (1 + 0.01)
    assert!(close(q.monthly_payment, dec!(40400), dec!(0.0000001)));
}

// ===========================================================================
// Errors
// ===========================================================================

#[test]
fn test_invalid_arguments() {
    assert!(matches!(
        compute_amortization(dec!(0), dec!(12), 12),
        Err(LendingError::InvalidArgument { .. })
    ));
    assert!(matches!(
        compute_amortization(dec!(10000), dec!(12), 0),
        Err(LendingError::InvalidArgument { .. })
    ));
    assert!(matches!(
        compute_amortization(dec!(10000), dec!(-1), 12),
        Err(LendingError::InvalidArgument { .. })
    ));
}

#[test]
fn test_unknown_category_tag() {
    assert!(matches!(
        annual_rate_percent("holiday"),
        Err(LendingError::UnknownCategory(_))
    ));
}

// ===========================================================================
// Schedule agrees with the quote
// ===========================================================================

#[test]
fn test_schedule_totals_match_quote() {
    let q = compute_amortization(dec!(500000), dec!(12), 36).unwrap();
    let schedule = build_schedule(&ScheduleInput {
        principal: dec!(500000),
        annual_rate_percent: dec!(12),
        term_months: 36,
        first_payment_date: None,
    })
    .unwrap()
    .result;

    assert_eq!(schedule.monthly_payment, q.monthly_payment);
    assert!(close(schedule.total_payment, q.total_payment, dec!(0.0001)));
    assert!(close(schedule.total_interest, q.total_interest, dec!(0.0001)));
    assert!(schedule.rows.iter().all(|r| r.closing_balance >= Decimal::ZERO));
}
