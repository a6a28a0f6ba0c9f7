//! Loan categories, their fixed annual rates, and the product terms offered
//! for each category.

use std::fmt;
use std::str::FromStr;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LendingError;
use crate::types::{Money, Rate};
use crate::LendingResult;

// ---------------------------------------------------------------------------
// Categories and rates
// ---------------------------------------------------------------------------

/// Closed set of loan categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanCategory {
    #[serde(alias = "Personal")]
    Personal,
    #[serde(alias = "Business")]
    Business,
    #[serde(alias = "Emergency")]
    Emergency,
}

impl LoanCategory {
    pub const ALL: [LoanCategory; 3] = [
        LoanCategory::Personal,
        LoanCategory::Business,
        LoanCategory::Emergency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanCategory::Personal => "personal",
            LoanCategory::Business => "business",
            LoanCategory::Emergency => "emergency",
        }
    }

    /// Fixed nominal annual rate, as a percentage (12 = 12%).
    pub fn annual_rate_percent(&self) -> Rate {
        match self {
            LoanCategory::Personal => dec!(12),
            LoanCategory::Business => dec!(10),
            LoanCategory::Emergency => dec!(8),
        }
    }
}

impl fmt::Display for LoanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanCategory {
    type Err = LendingError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "personal" => Ok(LoanCategory::Personal),
            "business" => Ok(LoanCategory::Business),
            "emergency" => Ok(LoanCategory::Emergency),
            _ => Err(LendingError::UnknownCategory(tag.to_string())),
        }
    }
}

/// Look up the annual rate percentage for a category tag.
pub fn annual_rate_percent(tag: &str) -> LendingResult<Rate> {
    Ok(tag.parse::<LoanCategory>()?.annual_rate_percent())
}

// ---------------------------------------------------------------------------
// Product terms
// ---------------------------------------------------------------------------

/// Terms under which a loan category is offered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanProduct {
    pub category: LoanCategory,
    /// Annual rate as a percentage.
    pub annual_rate_percent: Rate,
    /// Largest amount a single loan may be for.
    pub max_amount: Money,
    pub min_term_months: u32,
    pub max_term_months: u32,
    /// Savings balance a member must hold to apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_savings: Option<Money>,
    /// Membership tenure required to apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_membership_months: Option<u32>,
}

impl LoanProduct {
    /// The institution's published terms for `category`.
    pub fn standard(category: LoanCategory) -> Self {
        let annual_rate_percent = category.annual_rate_percent();
        match category {
            LoanCategory::Personal => LoanProduct {
                category,
                annual_rate_percent,
                max_amount: dec!(500_000),
                min_term_months: 1,
                max_term_months: 36,
                min_savings: Some(dec!(10_000)),
                min_membership_months: Some(3),
            },
            LoanCategory::Business => LoanProduct {
                category,
                annual_rate_percent,
                max_amount: dec!(2_000_000),
                min_term_months: 6,
                max_term_months: 60,
                min_savings: None,
                min_membership_months: Some(6),
            },
            LoanCategory::Emergency => LoanProduct {
                category,
                annual_rate_percent,
                max_amount: dec!(100_000),
                min_term_months: 1,
                max_term_months: 12,
                min_savings: Some(dec!(5_000)),
                min_membership_months: None,
            },
        }
    }

    pub fn term_in_range(&self, term_months: u32) -> bool {
        (self.min_term_months..=self.max_term_months).contains(&term_months)
    }

    pub(crate) fn validate(&self) -> LendingResult<()> {
        let field = format!("products.{}", self.category);
        if self.annual_rate_percent < Rate::ZERO {
            return Err(LendingError::invalid(&field, "annual rate cannot be negative"));
        }
        if self.max_amount <= Money::ZERO {
            return Err(LendingError::invalid(&field, "max amount must be positive"));
        }
        if self.min_term_months == 0 || self.min_term_months > self.max_term_months {
            return Err(LendingError::invalid(
                &field,
                format!(
                    "term range {}-{} months is empty or starts at zero",
                    self.min_term_months, self.max_term_months
                ),
            ));
        }
        if self.min_savings.is_some_and(|s| s < Money::ZERO) {
            return Err(LendingError::invalid(&field, "minimum savings cannot be negative"));
        }
        Ok(())
    }
}

/// Published terms for every category, in catalogue order.
pub fn loan_products() -> Vec<LoanProduct> {
    LoanCategory::ALL.iter().map(|c| LoanProduct::standard(*c)).collect()
}
