use serde_json::Value;

use sacco_lending_core::LendingPolicy;

/// List the loan products offered under `policy`.
pub fn run_products(policy: &LendingPolicy) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(&policy.products)?)
}
