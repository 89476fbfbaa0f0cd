use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::loan::payment::monthly_payment;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::HomeCostResult;

/// Input for the interest rate sensitivity sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestRateSweepInput {
    pub principal: Money,
    pub rate_values: Vec<Rate>,
    pub term_months: u32,
}

/// Monthly payment at one interest rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestRateScenario {
    pub rate: Rate,
    pub monthly_payment: Money,
}

/// Monthly payment for each interest rate, in input order.
pub fn sweep_interest_rate(
    input: &InterestRateSweepInput,
) -> HomeCostResult<ComputationOutput<Vec<InterestRateScenario>>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    crate::sweep::require_non_empty("rate_values", &input.rate_values)?;

    let mut scenarios = Vec::with_capacity(input.rate_values.len());
    for &rate in &input.rate_values {
        scenarios.push(InterestRateScenario {
            rate,
            monthly_payment: monthly_payment(input.principal, rate, input.term_months)?,
        });
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Interest Rate Sensitivity Sweep",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "rate_values": input.rate_values.len(),
            "term_months": input.term_months,
        }),
        warnings,
        elapsed,
        scenarios,
    ))
}
