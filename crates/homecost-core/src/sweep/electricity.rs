use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::electricity::cost::{default_support_limit, total_electricity_cost, ElectricityUsage};
use crate::types::{with_metadata, ComputationOutput, KilowattHours, Money};
use crate::HomeCostResult;

/// Input ranges for the electricity cost sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectricitySweepInput {
    pub usage_values: Vec<KilowattHours>,
    pub price_values: Vec<Money>,
    pub markup_per_kwh: Money,
    pub fixed_cost: Money,
    #[serde(default = "default_support_limit")]
    pub support_limit: Money,
}

/// One usage × price combination and its total cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectricityScenario {
    pub kwh_usage: KilowattHours,
    pub price_per_kwh: Money,
    pub total_cost: Money,
}

/// Total electricity cost for every usage × price combination.
///
/// Rows are produced usage-major, price-minor; consumers may rely on this
/// order.
pub fn sweep_electricity(
    input: &ElectricitySweepInput,
) -> HomeCostResult<ComputationOutput<Vec<ElectricityScenario>>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    crate::sweep::require_non_empty("usage_values", &input.usage_values)?;
    crate::sweep::require_non_empty("price_values", &input.price_values)?;

    let mut scenarios =
        Vec::with_capacity(input.usage_values.len() * input.price_values.len());

    for &kwh_usage in &input.usage_values {
        for &price_per_kwh in &input.price_values {
            let usage = ElectricityUsage {
                kwh_usage,
                price_per_kwh,
                markup_per_kwh: input.markup_per_kwh,
                fixed_cost: input.fixed_cost,
                support_limit: input.support_limit,
            };
            let total_cost = total_electricity_cost(&usage)?;
            scenarios.push(ElectricityScenario {
                kwh_usage,
                price_per_kwh,
                total_cost,
            });
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Electricity Cost Scenario Sweep",
        &serde_json::json!({
            "usage_values": input.usage_values.len(),
            "price_values": input.price_values.len(),
            "markup_per_kwh": input.markup_per_kwh.to_string(),
            "fixed_cost": input.fixed_cost.to_string(),
            "support_limit": input.support_limit.to_string(),
        }),
        warnings,
        elapsed,
        scenarios,
    ))
}
