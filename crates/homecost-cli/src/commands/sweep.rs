use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use homecost_core::sweep::electricity::{sweep_electricity, ElectricitySweepInput};
use homecost_core::sweep::household::{sweep_household, HouseholdSweepInput};
use homecost_core::sweep::interest::{sweep_interest_rate, InterestRateSweepInput};
use homecost_core::sweep::range_values;
use homecost_core::types::SweepRange;

use crate::input;

/// Arguments for the electricity cost sweep
#[derive(Args)]
pub struct SweepElectricityArgs {
    /// Usage range in kWh, as min:max:step (e.g. "500:5000:500")
    #[arg(long)]
    pub usage: String,

    /// Price range per kWh, as min:max:step (e.g. "0.5:2.0:0.25")
    #[arg(long)]
    pub price: String,

    /// Supplier markup per kWh
    #[arg(long, default_value = "0")]
    pub markup: Decimal,

    /// Fixed subscription cost for the period
    #[arg(long, default_value = "0")]
    pub fixed_cost: Decimal,

    /// Government support threshold price per kWh
    #[arg(long, default_value = "0.9125")]
    pub support_limit: Decimal,
}

/// Arguments for the interest rate sweep
#[derive(Args)]
pub struct SweepRatesArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Rate range as min:max:step (e.g. "0.01:0.05:0.0025")
    #[arg(long)]
    pub rates: String,

    /// Loan term in months
    #[arg(long, default_value = "360")]
    pub term_months: u32,
}

/// Arguments for the full household sweep
#[derive(Args)]
pub struct SweepHouseholdArgs {
    /// Path to a JSON or YAML file with one value list per input dimension
    #[arg(long)]
    pub input: String,
}

/// Parse a min:max:step range specification.
fn parse_range(spec: &str) -> Result<SweepRange, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("Range must be min:max:step, got '{}'", spec).into());
    }
    Ok(SweepRange {
        min: parts[0].parse()?,
        max: parts[1].parse()?,
        step: parts[2].parse()?,
    })
}

pub fn run_sweep_electricity(
    args: SweepElectricityArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let input = ElectricitySweepInput {
        usage_values: range_values(&parse_range(&args.usage)?)?,
        price_values: range_values(&parse_range(&args.price)?)?,
        markup_per_kwh: args.markup,
        fixed_cost: args.fixed_cost,
        support_limit: args.support_limit,
    };
    let result = sweep_electricity(&input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_sweep_rates(args: SweepRatesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = InterestRateSweepInput {
        principal: args.principal,
        rate_values: range_values(&parse_range(&args.rates)?)?,
        term_months: args.term_months,
    };
    let result = sweep_interest_rate(&input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_sweep_household(
    args: SweepHouseholdArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let input: HouseholdSweepInput = input::file::read_input(&args.input)?;
    let result = sweep_household(&input)?;
    Ok(serde_json::to_value(result)?)
}
