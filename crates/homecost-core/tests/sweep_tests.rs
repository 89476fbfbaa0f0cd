#![cfg(feature = "sweep")]

use homecost_core::sweep::electricity::{sweep_electricity, ElectricitySweepInput};
use homecost_core::sweep::household::{
    household_scenarios, sweep_household, HouseholdSweepInput,
};
use homecost_core::sweep::interest::{sweep_interest_rate, InterestRateSweepInput};
use homecost_core::sweep::range_values;
use homecost_core::types::SweepRange;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn base_household_sweep() -> HouseholdSweepInput {
    HouseholdSweepInput {
        house_price_values: vec![dec!(2000000)],
        interest_rate_values: vec![dec!(0.03)],
        fixed_cost_house_values: vec![dec!(3000)],
        kwh_usage_values: vec![dec!(1000)],
        kwh_price_values: vec![dec!(1.0)],
        markup_values: vec![dec!(0.1)],
        fixed_cost_electricity_values: vec![dec!(100)],
        term_months_values: vec![360],
        party_a_fixed_costs_values: vec![dec!(12000)],
        party_b_fixed_costs_values: vec![dec!(12000)],
        transaction_costs_values: vec![dec!(200000)],
        equity_values: vec![dec!(500000)],
        ownership_fraction_values: vec![dec!(0.5)],
        support_limit: dec!(0.9125),
    }
}

// ===========================================================================
// Range expansion
// ===========================================================================

#[test]
fn test_interest_rate_range_expansion() {
    // 1% to 5% in 1% steps, the classic sensitivity setup
    let range = SweepRange {
        min: dec!(0.01),
        max: dec!(0.05),
        step: dec!(0.01),
    };
    let values = range_values(&range).unwrap();
    assert_eq!(values.len(), 5);
    assert_eq!(values[0], dec!(0.01));
    assert_eq!(values[4], dec!(0.05));
}

// ===========================================================================
// Electricity sweep
// ===========================================================================

#[test]
fn test_electricity_sweep_is_usage_major() {
    let input = ElectricitySweepInput {
        usage_values: vec![dec!(500), dec!(1000)],
        price_values: vec![dec!(0.8), dec!(1.5)],
        markup_per_kwh: dec!(0.1),
        fixed_cost: dec!(100),
        support_limit: dec!(0.9125),
    };
    let result = sweep_electricity(&input).unwrap();
    let rows = &result.result;

    assert_eq!(rows.len(), 4);
    assert_eq!((rows[0].kwh_usage, rows[0].price_per_kwh), (dec!(500), dec!(0.8)));
    assert_eq!((rows[1].kwh_usage, rows[1].price_per_kwh), (dec!(500), dec!(1.5)));
    assert_eq!((rows[2].kwh_usage, rows[2].price_per_kwh), (dec!(1000), dec!(0.8)));
    assert_eq!((rows[3].kwh_usage, rows[3].price_per_kwh), (dec!(1000), dec!(1.5)));

    // Below the support limit: plain tariff. 100 + 500 * 0.9 = 550
    assert_eq!(rows[0].total_cost, dec!(550));
    // Above the limit: subsidised. 100 + 500*1.6 - 500*0.5875*0.9 = 635.625
    assert_eq!(rows[1].total_cost, dec!(635.625));
}

// ===========================================================================
// Interest rate sweep
// ===========================================================================

#[test]
fn test_interest_sweep_preserves_input_order() {
    let input = InterestRateSweepInput {
        principal: dec!(2500000),
        rate_values: vec![dec!(0.05), dec!(0.01), dec!(0.03)],
        term_months: 360,
    };
    let result = sweep_interest_rate(&input).unwrap();
    let rows = &result.result;

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].rate, dec!(0.05));
    assert_eq!(rows[1].rate, dec!(0.01));
    assert_eq!(rows[2].rate, dec!(0.03));
}

// ===========================================================================
// Household sweep
// ===========================================================================

#[test]
fn test_household_sweep_two_by_two() {
    let mut input = base_household_sweep();
    input.house_price_values = vec![dec!(2000000), dec!(2500000)];
    input.interest_rate_values = vec![dec!(0.02), dec!(0.03)];

    let result = sweep_household(&input).unwrap();
    assert_eq!(result.result.len(), 4);

    for row in &result.result {
        // Each row carries its own inputs and a self-consistent breakdown
        assert_eq!(
            row.loan_principal,
            row.house_price - (row.equity - row.transaction_costs)
        );
        assert_eq!(
            row.total_cost,
            row.monthly_loan_payment + row.electricity_cost + row.fixed_cost_house
        );
        assert_eq!(row.party_a_total, row.party_a_share + row.party_a_fixed_costs);
        assert_eq!(row.party_b_total, row.party_b_share + row.party_b_fixed_costs);
    }
}

#[test]
fn test_household_sweep_never_applies_loan_limit() {
    // The bulk path has no loan cap: a combination that the single-shot
    // breakdown would reject still produces a row
    let mut input = base_household_sweep();
    input.equity_values = vec![dec!(100000), dec!(2500000)];

    let result = sweep_household(&input).unwrap();
    assert_eq!(result.result.len(), 2);

    // First combination: a 2.1m loan. Second: negative loan, row still there.
    assert_eq!(result.result[0].loan_principal, dec!(2100000));
    assert_eq!(result.result[1].loan_principal, dec!(-300000));
}

#[test]
fn test_streaming_iterator_matches_materialized_sweep() {
    let mut input = base_household_sweep();
    input.interest_rate_values = vec![dec!(0.02), dec!(0.04)];
    input.term_months_values = vec![240, 360];

    let materialized = sweep_household(&input).unwrap().result;
    let streamed: Vec<_> = household_scenarios(&input).unwrap().collect();

    assert_eq!(materialized.len(), streamed.len());
    for (a, b) in materialized.iter().zip(streamed.iter()) {
        assert_eq!(a.interest_rate, b.interest_rate);
        assert_eq!(a.term_months, b.term_months);
        assert_eq!(a.monthly_loan_payment, b.monthly_loan_payment);
        assert_eq!(a.party_a_total, b.party_a_total);
    }
}

#[test]
fn test_combination_count_large_sweep() {
    let mut input = base_household_sweep();
    // 4 * 5 * 3 * 2 = 120 combinations without materializing anything big
    input.house_price_values = (1..=4).map(|i| Decimal::from(i) * dec!(1000000)).collect();
    input.interest_rate_values = vec![dec!(0.01), dec!(0.02), dec!(0.03), dec!(0.04), dec!(0.05)];
    input.kwh_usage_values = vec![dec!(500), dec!(1000), dec!(1500)];
    input.ownership_fraction_values = vec![dec!(0.4), dec!(0.6)];

    let iter = household_scenarios(&input).unwrap();
    assert_eq!(iter.combination_count(), 120);
    assert_eq!(iter.count(), 120);
}
