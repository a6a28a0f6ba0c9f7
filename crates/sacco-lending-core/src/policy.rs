//! Lending policy: the configurable side of eligibility and product terms.
//!
//! `LendingPolicy::default()` mirrors the institution's published terms. A
//! policy may be deserialised from JSON; missing fields take their defaults.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::eligibility::DEFAULT_SAVINGS_MULTIPLIER;
use crate::error::LendingError;
use crate::products::{loan_products, LoanCategory, LoanProduct};
use crate::types::Multiple;
use crate::LendingResult;

/// What happens when a request exceeds the savings-based eligibility limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverEligibilityAction {
    /// Refer to the loan committee for manual underwriting.
    #[default]
    Refer,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LendingPolicy {
    pub savings_multiplier: Multiple,
    pub over_eligibility: OverEligibilityAction,
    pub products: Vec<LoanProduct>,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        LendingPolicy {
            savings_multiplier: DEFAULT_SAVINGS_MULTIPLIER,
            over_eligibility: OverEligibilityAction::default(),
            products: loan_products(),
        }
    }
}

impl LendingPolicy {
    /// Parse and validate a policy from JSON.
    pub fn from_json(json: &str) -> LendingResult<Self> {
        let policy: LendingPolicy = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> LendingResult<()> {
        if self.savings_multiplier < Decimal::ZERO {
            return Err(LendingError::invalid(
                "savings_multiplier",
                "Savings multiplier cannot be negative",
            ));
        }
        if self.products.is_empty() {
            return Err(LendingError::invalid("products", "At least one product is required"));
        }
        let mut seen = HashSet::new();
        for product in &self.products {
            if !seen.insert(product.category) {
                return Err(LendingError::invalid(
                    "products",
                    format!("duplicate product for category '{}'", product.category),
                ));
            }
            product.validate()?;
        }
        Ok(())
    }

    /// Terms for `category`. Categories absent from the policy are not offered.
    pub fn product(&self, category: LoanCategory) -> LendingResult<&LoanProduct> {
        self.products
            .iter()
            .find(|p| p.category == category)
            .ok_or_else(|| LendingError::UnknownCategory(category.to_string()))
    }
}
