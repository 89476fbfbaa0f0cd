use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::HomeCostError;
use crate::types::{KilowattHours, Money};
use crate::HomeCostResult;

/// Usage above this receives no government support at all.
pub const SUPPORT_USAGE_CUTOFF_KWH: Decimal = dec!(5000);

/// Default support threshold price per kWh, VAT included.
pub const DEFAULT_SUPPORT_LIMIT: Decimal = dec!(0.9125);

/// Fraction of the price excess covered by the support scheme.
const SUPPORT_COVERAGE: Decimal = dec!(0.9);

pub(crate) fn default_support_limit() -> Money {
    DEFAULT_SUPPORT_LIMIT
}

/// Electricity usage and tariff for one billing period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectricityUsage {
    pub kwh_usage: KilowattHours,
    /// Spot price per kWh, VAT included
    pub price_per_kwh: Money,
    /// Supplier markup per kWh
    pub markup_per_kwh: Money,
    /// Fixed subscription cost for the period
    pub fixed_cost: Money,
    #[serde(default = "default_support_limit")]
    pub support_limit: Money,
}

/// Government support for one period of electricity usage.
///
/// Support is only defined above the limit price; at or below it the scheme
/// contributes zero rather than going negative. Usage above the cutoff
/// receives nothing regardless of price.
pub fn government_support(
    kwh_usage: KilowattHours,
    price_incl_vat: Money,
    support_limit: Money,
) -> HomeCostResult<Money> {
    require_non_negative("kwh_usage", kwh_usage)?;
    require_non_negative("price_incl_vat", price_incl_vat)?;
    require_non_negative("support_limit", support_limit)?;

    Ok(support_amount(kwh_usage, price_incl_vat, support_limit))
}

/// Total electricity cost for one period:
/// `fixed_cost + kwh_usage * (price + markup)`, minus government support when
/// the price is above the support limit. At or below the limit the scheme
/// does not enter the calculation at all.
pub fn total_electricity_cost(usage: &ElectricityUsage) -> HomeCostResult<Money> {
    require_non_negative("kwh_usage", usage.kwh_usage)?;
    require_non_negative("price_per_kwh", usage.price_per_kwh)?;
    require_non_negative("markup_per_kwh", usage.markup_per_kwh)?;
    require_non_negative("fixed_cost", usage.fixed_cost)?;
    require_non_negative("support_limit", usage.support_limit)?;

    Ok(cost_amount(usage))
}

/// Raw support formula, inputs already validated.
pub(crate) fn support_amount(
    kwh_usage: KilowattHours,
    price_incl_vat: Money,
    support_limit: Money,
) -> Money {
    if kwh_usage > SUPPORT_USAGE_CUTOFF_KWH {
        return Decimal::ZERO;
    }
    if price_incl_vat <= support_limit {
        return Decimal::ZERO;
    }
    SUPPORT_COVERAGE * kwh_usage * (price_incl_vat - support_limit)
}

/// Raw cost formula, inputs already validated.
pub(crate) fn cost_amount(usage: &ElectricityUsage) -> Money {
    let costs =
        usage.fixed_cost + usage.kwh_usage * (usage.price_per_kwh + usage.markup_per_kwh);

    if usage.price_per_kwh <= usage.support_limit {
        return costs;
    }

    costs - support_amount(usage.kwh_usage, usage.price_per_kwh, usage.support_limit)
}

fn require_non_negative(field: &str, value: Decimal) -> HomeCostResult<()> {
    if value < Decimal::ZERO {
        return Err(HomeCostError::InvalidInput {
            field: field.into(),
            reason: "Value cannot be negative".into(),
        });
    }
    Ok(())
}
