use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

/// Result fields holding money. Only these get currency formatting.
const MONEY_FIELDS: &[&str] = &[
    "monthly_payment",
    "total_payment",
    "total_interest",
    "total_principal",
    "max_eligible_loan",
    "eligibility_headroom",
    "requested_amount",
    "total_savings",
    "opening_balance",
    "payment",
    "interest",
    "principal",
    "closing_balance",
    "max_amount",
    "min_savings",
    "monthly_income",
];

pub fn is_money_field(key: &str) -> bool {
    MONEY_FIELDS.contains(&key)
}

/// `12345.678` -> `KSh 12,345.68`. Two decimals, midpoint away from zero.
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    if symbol.is_empty() {
        format!("{sign}{grouped}.{cents}")
    } else {
        format!("{sign}{symbol} {grouped}.{cents}")
    }
}

/// Currency-format `value` when `key` names a money field and the value is a
/// decimal; otherwise `None`.
pub fn format_field(key: &str, value: &Value, symbol: &str) -> Option<String> {
    if !is_money_field(key) {
        return None;
    }
    let amount: Decimal = match value {
        Value::String(s) => s.parse().ok()?,
        Value::Number(n) => n.to_string().parse().ok()?,
        _ => return None,
    };
    Some(format_amount(amount, symbol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_thousands_and_rounding() {
        assert_eq!(format_amount(dec!(12345.678), "KSh"), "KSh 12,345.68");
        assert_eq!(format_amount(dec!(4442.439433917), "KSh"), "KSh 4,442.44");
        assert_eq!(format_amount(dec!(2000000), "KSh"), "KSh 2,000,000.00");
        assert_eq!(format_amount(dec!(999.995), "KSh"), "KSh 1,000.00");
    }

    #[test]
    fn test_small_and_negative() {
        assert_eq!(format_amount(dec!(0.5), "KSh"), "KSh 0.50");
        assert_eq!(format_amount(dec!(-20000), "KSh"), "-KSh 20,000.00");
        assert_eq!(format_amount(dec!(-0.001), ""), "0.00");
    }

    #[test]
    fn test_only_money_fields_are_formatted() {
        let v = Value::String("13187.383".into());
        assert_eq!(format_field("monthly_payment", &v, "$").as_deref(), Some("$ 13,187.38"));
        assert_eq!(format_field("annual_rate_percent", &v, "$"), None);
        assert_eq!(format_field("payment", &Value::Null, "$"), None);
    }
}
