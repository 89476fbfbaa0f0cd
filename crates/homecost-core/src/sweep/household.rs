use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::electricity::cost::{cost_amount, default_support_limit, ElectricityUsage};
use crate::error::HomeCostError;
use crate::loan::payment::annuity_factor;
use crate::types::{with_metadata, ComputationOutput, KilowattHours, Money, Rate};
use crate::HomeCostResult;

/// Above this many combinations the materializing sweep emits a warning and
/// recommends the streaming iterator instead.
const MATERIALIZE_WARNING_ROWS: u128 = 100_000;

/// Input ranges for the full household cost sweep, one list per dimension.
///
/// The cartesian product is iterated with `house_price_values` outermost and
/// `ownership_fraction_values` innermost, in field order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdSweepInput {
    pub house_price_values: Vec<Money>,
    pub interest_rate_values: Vec<Rate>,
    pub fixed_cost_house_values: Vec<Money>,
    pub kwh_usage_values: Vec<KilowattHours>,
    pub kwh_price_values: Vec<Money>,
    pub markup_values: Vec<Money>,
    pub fixed_cost_electricity_values: Vec<Money>,
    pub term_months_values: Vec<u32>,
    pub party_a_fixed_costs_values: Vec<Money>,
    pub party_b_fixed_costs_values: Vec<Money>,
    pub transaction_costs_values: Vec<Money>,
    pub equity_values: Vec<Money>,
    pub ownership_fraction_values: Vec<Decimal>,
    #[serde(default = "default_support_limit")]
    pub support_limit: Money,
}

/// One combination of sweep inputs and its derived breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdScenario {
    pub house_price: Money,
    pub interest_rate: Rate,
    pub fixed_cost_house: Money,
    pub kwh_usage: KilowattHours,
    pub kwh_price: Money,
    pub markup: Money,
    pub fixed_cost_electricity: Money,
    pub term_months: u32,
    pub party_a_fixed_costs: Money,
    pub party_b_fixed_costs: Money,
    pub transaction_costs: Money,
    pub equity: Money,
    pub ownership_fraction_a: Decimal,
    pub loan_principal: Money,
    pub monthly_loan_payment: Money,
    pub electricity_cost: Money,
    pub total_cost: Money,
    pub party_a_share: Money,
    pub party_b_share: Money,
    pub party_a_total: Money,
    pub party_b_total: Money,
}

const DIMS: usize = 13;

/// Lazy producer of household scenarios.
///
/// Annuity factors are precomputed per rate × term pair at construction, so
/// advancing the iterator costs a handful of Decimal multiplications per row.
pub struct HouseholdScenarios {
    input: HouseholdSweepInput,
    /// factors[rate_idx][term_idx]
    factors: Vec<Vec<Decimal>>,
    indices: Option<[usize; DIMS]>,
}

/// Validate the ranges and build the lazy scenario iterator.
///
/// Unlike the single-shot breakdown, the bulk path applies no loan limit and
/// rejects no rows: a combination whose equity exceeds the house price still
/// produces a row (with a negative loan and payment).
pub fn household_scenarios(input: &HouseholdSweepInput) -> HomeCostResult<HouseholdScenarios> {
    validate_input(input)?;

    let mut factors = Vec::with_capacity(input.interest_rate_values.len());
    for &rate in &input.interest_rate_values {
        let mut row = Vec::with_capacity(input.term_months_values.len());
        for &term in &input.term_months_values {
            row.push(annuity_factor(rate / dec!(12), term)?);
        }
        factors.push(row);
    }

    Ok(HouseholdScenarios {
        input: input.clone(),
        factors,
        indices: Some([0; DIMS]),
    })
}

/// Materialize the full cartesian product of all thirteen input ranges.
///
/// Output size is the product of all range lengths; above
/// `MATERIALIZE_WARNING_ROWS` combinations a warning recommends
/// [`household_scenarios`] for row-by-row consumption.
pub fn sweep_household(
    input: &HouseholdSweepInput,
) -> HomeCostResult<ComputationOutput<Vec<HouseholdScenario>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let iter = household_scenarios(input)?;
    let combinations = iter.combination_count();

    if combinations > MATERIALIZE_WARNING_ROWS {
        warnings.push(format!(
            "Materializing {combinations} combinations; consider household_scenarios() \
             to stream rows instead"
        ));
    }

    let scenarios: Vec<HouseholdScenario> = iter.collect();

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Household Cost Scenario Sweep",
        &serde_json::json!({
            "combinations": combinations.to_string(),
            "support_limit": input.support_limit.to_string(),
        }),
        warnings,
        elapsed,
        scenarios,
    ))
}

impl HouseholdScenarios {
    /// Number of rows the iterator will produce.
    pub fn combination_count(&self) -> u128 {
        self.dim_lens().iter().map(|&len| len as u128).product()
    }

    fn dim_lens(&self) -> [usize; DIMS] {
        [
            self.input.house_price_values.len(),
            self.input.interest_rate_values.len(),
            self.input.fixed_cost_house_values.len(),
            self.input.kwh_usage_values.len(),
            self.input.kwh_price_values.len(),
            self.input.markup_values.len(),
            self.input.fixed_cost_electricity_values.len(),
            self.input.term_months_values.len(),
            self.input.party_a_fixed_costs_values.len(),
            self.input.party_b_fixed_costs_values.len(),
            self.input.transaction_costs_values.len(),
            self.input.equity_values.len(),
            self.input.ownership_fraction_values.len(),
        ]
    }

    fn evaluate(&self, idx: &[usize; DIMS]) -> HouseholdScenario {
        let input = &self.input;
        let house_price = input.house_price_values[idx[0]];
        let interest_rate = input.interest_rate_values[idx[1]];
        let fixed_cost_house = input.fixed_cost_house_values[idx[2]];
        let kwh_usage = input.kwh_usage_values[idx[3]];
        let kwh_price = input.kwh_price_values[idx[4]];
        let markup = input.markup_values[idx[5]];
        let fixed_cost_electricity = input.fixed_cost_electricity_values[idx[6]];
        let term_months = input.term_months_values[idx[7]];
        let party_a_fixed_costs = input.party_a_fixed_costs_values[idx[8]];
        let party_b_fixed_costs = input.party_b_fixed_costs_values[idx[9]];
        let transaction_costs = input.transaction_costs_values[idx[10]];
        let equity = input.equity_values[idx[11]];
        let ownership_fraction_a = input.ownership_fraction_values[idx[12]];

        let effective_equity = equity - transaction_costs;
        let loan_principal = house_price - effective_equity;
        let monthly_loan_payment = loan_principal * self.factors[idx[1]][idx[7]];

        let electricity_cost = cost_amount(&ElectricityUsage {
            kwh_usage,
            price_per_kwh: kwh_price,
            markup_per_kwh: markup,
            fixed_cost: fixed_cost_electricity,
            support_limit: input.support_limit,
        });

        let total_cost = monthly_loan_payment + electricity_cost + fixed_cost_house;

        let shared_half = electricity_cost / dec!(2) + fixed_cost_house / dec!(2);
        let party_a_share = monthly_loan_payment * ownership_fraction_a + shared_half;
        let party_b_share =
            monthly_loan_payment * (Decimal::ONE - ownership_fraction_a) + shared_half;

        HouseholdScenario {
            house_price,
            interest_rate,
            fixed_cost_house,
            kwh_usage,
            kwh_price,
            markup,
            fixed_cost_electricity,
            term_months,
            party_a_fixed_costs,
            party_b_fixed_costs,
            transaction_costs,
            equity,
            ownership_fraction_a,
            loan_principal,
            monthly_loan_payment,
            electricity_cost,
            total_cost,
            party_a_share,
            party_b_share,
            party_a_total: party_a_share + party_a_fixed_costs,
            party_b_total: party_b_share + party_b_fixed_costs,
        }
    }

    fn advance(&self, idx: &mut [usize; DIMS]) -> bool {
        let lens = self.dim_lens();
        // Odometer: increment the innermost dimension, carrying outwards
        for dim in (0..DIMS).rev() {
            idx[dim] += 1;
            if idx[dim] < lens[dim] {
                return true;
            }
            idx[dim] = 0;
        }
        false
    }
}

impl Iterator for HouseholdScenarios {
    type Item = HouseholdScenario;

    fn next(&mut self) -> Option<Self::Item> {
        let mut idx = self.indices?;
        let scenario = self.evaluate(&idx);
        self.indices = if self.advance(&mut idx) {
            Some(idx)
        } else {
            None
        };
        Some(scenario)
    }
}

fn validate_input(input: &HouseholdSweepInput) -> HomeCostResult<()> {
    crate::sweep::require_non_empty("house_price_values", &input.house_price_values)?;
    crate::sweep::require_non_empty("interest_rate_values", &input.interest_rate_values)?;
    crate::sweep::require_non_empty("fixed_cost_house_values", &input.fixed_cost_house_values)?;
    crate::sweep::require_non_empty("kwh_usage_values", &input.kwh_usage_values)?;
    crate::sweep::require_non_empty("kwh_price_values", &input.kwh_price_values)?;
    crate::sweep::require_non_empty("markup_values", &input.markup_values)?;
    crate::sweep::require_non_empty(
        "fixed_cost_electricity_values",
        &input.fixed_cost_electricity_values,
    )?;
    crate::sweep::require_non_empty("term_months_values", &input.term_months_values)?;
    crate::sweep::require_non_empty(
        "party_a_fixed_costs_values",
        &input.party_a_fixed_costs_values,
    )?;
    crate::sweep::require_non_empty(
        "party_b_fixed_costs_values",
        &input.party_b_fixed_costs_values,
    )?;
    crate::sweep::require_non_empty("transaction_costs_values", &input.transaction_costs_values)?;
    crate::sweep::require_non_empty("equity_values", &input.equity_values)?;
    crate::sweep::require_non_empty(
        "ownership_fraction_values",
        &input.ownership_fraction_values,
    )?;

    for &rate in &input.interest_rate_values {
        if rate < Decimal::ZERO {
            return Err(HomeCostError::InvalidInput {
                field: "interest_rate_values".into(),
                reason: "Interest rates cannot be negative".into(),
            });
        }
    }
    for &term in &input.term_months_values {
        if term == 0 {
            return Err(HomeCostError::InvalidInput {
                field: "term_months_values".into(),
                reason: "Loan terms must be at least 1 month".into(),
            });
        }
    }
    for &fraction in &input.ownership_fraction_values {
        if fraction < Decimal::ZERO || fraction > Decimal::ONE {
            return Err(HomeCostError::InvalidInput {
                field: "ownership_fraction_values".into(),
                reason: "Ownership fractions must be between 0 and 1".into(),
            });
        }
    }

    for (field, values) in [
        ("kwh_usage_values", &input.kwh_usage_values),
        ("kwh_price_values", &input.kwh_price_values),
        ("markup_values", &input.markup_values),
        (
            "fixed_cost_electricity_values",
            &input.fixed_cost_electricity_values,
        ),
    ] {
        for &value in values {
            if value < Decimal::ZERO {
                return Err(HomeCostError::InvalidInput {
                    field: field.into(),
                    reason: "Value cannot be negative".into(),
                });
            }
        }
    }

    if input.support_limit < Decimal::ZERO {
        return Err(HomeCostError::InvalidInput {
            field: "support_limit".into(),
            reason: "Value cannot be negative".into(),
        });
    }

    Ok(())
}
