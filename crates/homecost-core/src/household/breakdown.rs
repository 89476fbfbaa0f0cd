use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::electricity::cost::{total_electricity_cost, ElectricityUsage};
use crate::error::HomeCostError;
use crate::loan::payment::monthly_payment;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::HomeCostResult;

/// Input for the two-party household cost breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdInput {
    pub house_price: Money,
    pub interest_rate: Rate,
    /// Shared running costs of the house (housing association fees etc.)
    pub fixed_house_cost: Money,
    pub electricity: ElectricityUsage,
    pub term_months: u32,
    /// Party A's personal monthly fixed costs
    pub party_a_fixed_costs: Money,
    /// Party B's personal monthly fixed costs
    pub party_b_fixed_costs: Money,
    /// One-off purchase costs deducted from equity
    pub transaction_costs: Money,
    pub equity: Money,
    /// Party A's share of the loan payment, between 0 and 1
    pub ownership_fraction_a: Decimal,
    /// Hard cap on the computed loan principal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_loan_limit: Option<Money>,
}

/// Monthly cost breakdown for the household and both parties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdCostBreakdown {
    pub effective_equity: Money,
    pub loan_principal: Money,
    pub loan_payment: Money,
    pub electricity_cost: Money,
    pub fixed_house_cost: Money,
    pub total_cost: Money,
    pub party_a_share: Money,
    pub party_b_share: Money,
    pub party_a_total: Money,
    pub party_b_total: Money,
    pub ownership_fraction_a: Decimal,
    pub ownership_fraction_b: Decimal,
}

/// Compose loan, electricity and fixed costs into a per-party breakdown.
///
/// Only the loan payment follows the ownership fraction; electricity and
/// fixed house costs are split 50/50 between the parties regardless.
pub fn household_breakdown(
    input: &HouseholdInput,
) -> HomeCostResult<ComputationOutput<HouseholdCostBreakdown>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let effective_equity = input.equity - input.transaction_costs;
    let loan_principal = input.house_price - effective_equity;

    if let Some(limit) = input.max_loan_limit {
        if loan_principal > limit {
            return Err(HomeCostError::LoanLimitExceeded {
                loan_amount: loan_principal,
                limit,
            });
        }
    }

    if loan_principal < Decimal::ZERO {
        return Err(HomeCostError::InvalidInput {
            field: "equity".into(),
            reason: "Equity net of transaction costs exceeds the house price".into(),
        });
    }

    let loan_payment = if loan_principal.is_zero() {
        warnings.push("Equity fully covers the purchase; no loan payment".into());
        Decimal::ZERO
    } else {
        monthly_payment(loan_principal, input.interest_rate, input.term_months)?
    };

    if loan_principal > input.house_price * dec!(0.85) {
        warnings.push(format!(
            "Loan-to-value {:.1}% exceeds 85% of the house price",
            loan_principal / input.house_price * dec!(100)
        ));
    }

    let electricity_cost = total_electricity_cost(&input.electricity)?;
    let total_cost = loan_payment + electricity_cost + input.fixed_house_cost;

    let ownership_fraction_b = Decimal::ONE - input.ownership_fraction_a;
    let shared_half = electricity_cost / dec!(2) + input.fixed_house_cost / dec!(2);

    let party_a_share = loan_payment * input.ownership_fraction_a + shared_half;
    let party_b_share = loan_payment * ownership_fraction_b + shared_half;

    let party_a_total = party_a_share + input.party_a_fixed_costs;
    let party_b_total = party_b_share + input.party_b_fixed_costs;

    let output = HouseholdCostBreakdown {
        effective_equity,
        loan_principal,
        loan_payment,
        electricity_cost,
        fixed_house_cost: input.fixed_house_cost,
        total_cost,
        party_a_share,
        party_b_share,
        party_a_total,
        party_b_total,
        ownership_fraction_a: input.ownership_fraction_a,
        ownership_fraction_b,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Two-Party Household Cost Breakdown",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate_input(input: &HouseholdInput) -> HomeCostResult<()> {
    if input.house_price <= Decimal::ZERO {
        return Err(HomeCostError::InvalidInput {
            field: "house_price".into(),
            reason: "House price must be positive".into(),
        });
    }
    if input.interest_rate < Decimal::ZERO {
        return Err(HomeCostError::InvalidInput {
            field: "interest_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if input.term_months == 0 {
        return Err(HomeCostError::InvalidInput {
            field: "term_months".into(),
            reason: "Loan term must be at least 1 month".into(),
        });
    }
    if input.ownership_fraction_a < Decimal::ZERO || input.ownership_fraction_a > Decimal::ONE {
        return Err(HomeCostError::InvalidInput {
            field: "ownership_fraction_a".into(),
            reason: "Ownership fraction must be between 0 and 1".into(),
        });
    }

    for (field, value) in [
        ("fixed_house_cost", input.fixed_house_cost),
        ("party_a_fixed_costs", input.party_a_fixed_costs),
        ("party_b_fixed_costs", input.party_b_fixed_costs),
        ("transaction_costs", input.transaction_costs),
        ("equity", input.equity),
    ] {
        if value < Decimal::ZERO {
            return Err(HomeCostError::InvalidInput {
                field: field.into(),
                reason: "Value cannot be negative".into(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input() -> HouseholdInput {
        HouseholdInput {
            house_price: dec!(2500000),
            interest_rate: dec!(0.03),
            fixed_house_cost: dec!(3000),
            electricity: ElectricityUsage {
                kwh_usage: dec!(1000),
                price_per_kwh: dec!(1.0),
                markup_per_kwh: dec!(0.1),
                fixed_cost: dec!(100),
                support_limit: dec!(0.9125),
            },
            term_months: 360,
            party_a_fixed_costs: dec!(12000),
            party_b_fixed_costs: dec!(12000),
            transaction_costs: dec!(200000),
            equity: dec!(700000),
            ownership_fraction_a: dec!(0.5),
            max_loan_limit: None,
        }
    }

    #[test]
    fn test_loan_principal_from_effective_equity() {
        let result = household_breakdown(&sample_input()).unwrap();
        let out = &result.result;

        // effective equity = 700000 - 200000 = 500000
        assert_eq!(out.effective_equity, dec!(500000));
        // loan = 2500000 - 500000 = 2000000
        assert_eq!(out.loan_principal, dec!(2000000));
    }

    #[test]
    fn test_total_is_loan_plus_electricity_plus_house() {
        let result = household_breakdown(&sample_input()).unwrap();
        let out = &result.result;

        // electricity: 100 + 1000 * 1.1 = 1200, support: 1000 * 0.0875 * 0.9 = 78.75
        assert_eq!(out.electricity_cost, dec!(1121.25));
        assert_eq!(
            out.total_cost,
            out.loan_payment + out.electricity_cost + out.fixed_house_cost
        );
    }

    #[test]
    fn test_shares_sum_to_total() {
        let result = household_breakdown(&sample_input()).unwrap();
        let out = &result.result;
        let sum = out.party_a_share + out.party_b_share;
        assert!(
            (sum - out.total_cost).abs() < dec!(0.0000001),
            "shares {sum} vs total {}",
            out.total_cost
        );
    }

    #[test]
    fn test_asymmetric_split_only_affects_loan() {
        let mut input = sample_input();
        input.ownership_fraction_a = dec!(0.33);
        let result = household_breakdown(&input).unwrap();
        let out = &result.result;

        // The difference between the shares is exactly the loan asymmetry;
        // electricity and house costs are split 50/50 either way.
        let expected_diff = out.loan_payment * (dec!(0.67) - dec!(0.33));
        let diff = out.party_b_share - out.party_a_share;
        assert!((diff - expected_diff).abs() < dec!(0.0000001));

        let shared_half = out.electricity_cost / dec!(2) + out.fixed_house_cost / dec!(2);
        let a_running = out.party_a_share - out.loan_payment * dec!(0.33);
        let b_running = out.party_b_share - out.loan_payment * dec!(0.67);
        assert!((a_running - shared_half).abs() < dec!(0.0000001));
        assert!((b_running - shared_half).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_party_totals_add_personal_fixed_costs() {
        let mut input = sample_input();
        input.party_a_fixed_costs = dec!(12349);
        let result = household_breakdown(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.party_a_total, out.party_a_share + dec!(12349));
        assert_eq!(out.party_b_total, out.party_b_share + dec!(12000));
    }

    #[test]
    fn test_loan_limit_exceeded() {
        let mut input = sample_input();
        input.max_loan_limit = Some(dec!(1500000));

        match household_breakdown(&input).unwrap_err() {
            HomeCostError::LoanLimitExceeded { loan_amount, limit } => {
                assert_eq!(loan_amount, dec!(2000000));
                assert_eq!(limit, dec!(1500000));
            }
            other => panic!("Expected LoanLimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_loan_limit_boundary_passes() {
        let mut input = sample_input();
        input.max_loan_limit = Some(dec!(2000000));
        assert!(household_breakdown(&input).is_ok());
    }

    #[test]
    fn test_full_equity_purchase_warns() {
        let mut input = sample_input();
        input.equity = dec!(2700000); // effective equity exactly covers the price

        let result = household_breakdown(&input).unwrap();
        assert_eq!(result.result.loan_payment, Decimal::ZERO);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("no loan payment")));
    }

    #[test]
    fn test_equity_above_price_rejected() {
        let mut input = sample_input();
        input.equity = dec!(3000000);
        assert!(household_breakdown(&input).is_err());
    }

    #[test]
    fn test_high_ltv_warning() {
        let mut input = sample_input();
        input.equity = dec!(300000); // loan = 2400000, LTV 96%

        let result = household_breakdown(&input).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("exceeds 85%")));
    }

    #[test]
    fn test_ownership_fraction_out_of_range() {
        let mut input = sample_input();
        input.ownership_fraction_a = dec!(1.2);
        assert!(household_breakdown(&input).is_err());

        input.ownership_fraction_a = dec!(-0.1);
        assert!(household_breakdown(&input).is_err());
    }

    #[test]
    fn test_methodology_string() {
        let result = household_breakdown(&sample_input()).unwrap();
        assert_eq!(result.methodology, "Two-Party Household Cost Breakdown");
    }
}
