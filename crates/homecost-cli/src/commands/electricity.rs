use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use homecost_core::electricity::cost::{
    government_support, total_electricity_cost, ElectricityUsage,
};

/// Arguments for the per-period electricity cost
#[derive(Args)]
pub struct ElectricityCostArgs {
    /// Electricity usage in kWh
    #[arg(long)]
    pub usage: Decimal,

    /// Spot price per kWh, VAT included
    #[arg(long)]
    pub price: Decimal,

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

/// Arguments for the government support amount
#[derive(Args)]
pub struct GovtSupportArgs {
    /// Electricity usage in kWh
    #[arg(long)]
    pub usage: Decimal,

    /// Spot price per kWh, VAT included
    #[arg(long)]
    pub price: Decimal,

    /// Government support threshold price per kWh
    #[arg(long, default_value = "0.9125")]
    pub support_limit: Decimal,
}

pub fn run_electricity_cost(
    args: ElectricityCostArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let usage = ElectricityUsage {
        kwh_usage: args.usage,
        price_per_kwh: args.price,
        markup_per_kwh: args.markup,
        fixed_cost: args.fixed_cost,
        support_limit: args.support_limit,
    };
    let total = total_electricity_cost(&usage)?;
    let support = government_support(args.usage, args.price, args.support_limit)?;

    Ok(serde_json::json!({
        "kwh_usage": args.usage.to_string(),
        "price_per_kwh": args.price.to_string(),
        "markup_per_kwh": args.markup.to_string(),
        "fixed_cost": args.fixed_cost.to_string(),
        "support_limit": args.support_limit.to_string(),
        "government_support": support.to_string(),
        "total_cost": total.to_string(),
    }))
}

pub fn run_govt_support(args: GovtSupportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let support = government_support(args.usage, args.price, args.support_limit)?;

    Ok(serde_json::json!({
        "kwh_usage": args.usage.to_string(),
        "price_per_kwh": args.price.to_string(),
        "support_limit": args.support_limit.to_string(),
        "government_support": support.to_string(),
    }))
}
