use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::loan::payment::monthly_payment;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::HomeCostResult;

/// Terms of a fixed-payment amortizing loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
}

/// One row of the amortization schedule.
///
/// Period 0 is the pre-payment state: zero cumulatives, full remaining
/// balance. Currency fields are rounded to whole units, once per row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    pub cumulative_principal: Money,
    pub cumulative_interest: Money,
    pub cumulative_total: Money,
    pub remaining_balance: Money,
}

/// Complete amortization schedule for a loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    /// Unrounded fixed monthly payment
    pub monthly_payment: Money,
    /// term_months + 1 rows; row 0 is the pre-payment state
    pub rows: Vec<AmortizationRow>,
    pub total_principal: Money,
    pub total_interest: Money,
}

/// Build the full amortization schedule for a loan.
///
/// Accumulation runs at full precision; each row's currency fields are
/// rounded exactly once on output, and the remaining balance is derived from
/// `principal - cumulative_principal` so rounding error never compounds.
pub fn amortization_schedule(
    terms: &LoanTerms,
) -> HomeCostResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let payment = monthly_payment(terms.principal, terms.annual_rate, terms.term_months)?;
    let monthly_rate = terms.annual_rate / dec!(12);

    let mut rows = Vec::with_capacity(terms.term_months as usize + 1);
    rows.push(AmortizationRow {
        period: 0,
        payment: Decimal::ZERO,
        principal: Decimal::ZERO,
        interest: Decimal::ZERO,
        cumulative_principal: Decimal::ZERO,
        cumulative_interest: Decimal::ZERO,
        cumulative_total: Decimal::ZERO,
        remaining_balance: terms.principal.round_dp(0),
    });

    let mut cumulative_principal = Decimal::ZERO;
    let mut cumulative_interest = Decimal::ZERO;

    for period in 1..=terms.term_months {
        let opening_balance = terms.principal - cumulative_principal;
        let interest = opening_balance * monthly_rate;
        let principal_component = payment - interest;

        cumulative_principal += principal_component;
        cumulative_interest += interest;

        let cum_principal = cumulative_principal.round_dp(0);
        let cum_interest = cumulative_interest.round_dp(0);

        rows.push(AmortizationRow {
            period,
            payment: payment.round_dp(0),
            principal: principal_component.round_dp(0),
            interest: interest.round_dp(0),
            cumulative_principal: cum_principal,
            cumulative_interest: cum_interest,
            cumulative_total: cum_principal + cum_interest,
            remaining_balance: (terms.principal - cumulative_principal).round_dp(0),
        });
    }

    if let Some(last) = rows.last() {
        if last.remaining_balance.abs() > Decimal::ONE {
            warnings.push(format!(
                "Schedule does not close to zero: residual balance {}",
                last.remaining_balance
            ));
        }
    }

    let output = AmortizationSchedule {
        monthly_payment: payment,
        rows,
        total_principal: cumulative_principal.round_dp(0),
        total_interest: cumulative_interest.round_dp(0),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Payment Amortization Schedule",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "annual_rate": terms.annual_rate.to_string(),
            "term_months": terms.term_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_terms() -> LoanTerms {
        LoanTerms {
            principal: dec!(100000),
            annual_rate: dec!(0.05),
            term_months: 360,
        }
    }

    #[test]
    fn test_row_count_and_prepayment_state() {
        let result = amortization_schedule(&sample_terms()).unwrap();
        let sched = &result.result;

        assert_eq!(sched.rows.len(), 361);

        let first = &sched.rows[0];
        assert_eq!(first.period, 0);
        assert_eq!(first.cumulative_principal, Decimal::ZERO);
        assert_eq!(first.cumulative_interest, Decimal::ZERO);
        assert_eq!(first.remaining_balance, dec!(100000));
    }

    #[test]
    fn test_schedule_closes_to_zero() {
        let result = amortization_schedule(&sample_terms()).unwrap();
        let last = result.result.rows.last().unwrap();

        assert_eq!(last.period, 360);
        assert!(
            last.remaining_balance.abs() <= Decimal::ONE,
            "Residual balance {} exceeds rounding tolerance",
            last.remaining_balance
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_cumulative_total_is_sum_of_components() {
        let result = amortization_schedule(&sample_terms()).unwrap();
        for row in &result.result.rows {
            assert_eq!(
                row.cumulative_total,
                row.cumulative_principal + row.cumulative_interest
            );
        }
    }

    #[test]
    fn test_payments_sum_to_last_cumulative_total() {
        let result = amortization_schedule(&sample_terms()).unwrap();
        let sched = &result.result;
        let last = sched.rows.last().unwrap();

        // Exact cumulative total is payment * term; the rounded row may be
        // off by at most one unit.
        let exact = sched.monthly_payment * dec!(360);
        assert!(
            (exact - last.cumulative_total).abs() <= Decimal::ONE,
            "payment * term {} vs cumulative total {}",
            exact,
            last.cumulative_total
        );
    }

    #[test]
    fn test_first_month_split() {
        let result = amortization_schedule(&sample_terms()).unwrap();
        let first_payment = &result.result.rows[1];

        // Month 1 interest on the full balance: 100000 * 0.05/12 = 416.67 => 417 rounded
        assert_eq!(first_payment.interest, dec!(417));
        // Principal component: 536.82 - 416.67 = 120.15 => 120 rounded
        assert_eq!(first_payment.principal, dec!(120));
        assert_eq!(first_payment.payment, dec!(537));
    }

    #[test]
    fn test_remaining_balance_decreases() {
        let result = amortization_schedule(&sample_terms()).unwrap();
        let rows = &result.result.rows;
        for pair in rows.windows(2) {
            assert!(pair[1].remaining_balance < pair[0].remaining_balance);
        }
    }

    #[test]
    fn test_zero_rate_schedule() {
        let terms = LoanTerms {
            principal: dec!(120000),
            annual_rate: Decimal::ZERO,
            term_months: 120,
        };
        let result = amortization_schedule(&terms).unwrap();
        let sched = &result.result;

        assert_eq!(sched.monthly_payment, dec!(1000));
        assert_eq!(sched.total_interest, Decimal::ZERO);
        for row in &sched.rows[1..] {
            assert_eq!(row.interest, Decimal::ZERO);
            assert_eq!(row.principal, dec!(1000));
        }
        assert_eq!(sched.rows.last().unwrap().remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_one_month_term() {
        let terms = LoanTerms {
            principal: dec!(10000),
            annual_rate: dec!(0.12),
            term_months: 1,
        };
        let result = amortization_schedule(&terms).unwrap();
        let sched = &result.result;

        assert_eq!(sched.rows.len(), 2);
        // Single payment repays everything plus one month of interest at 1%
        assert_eq!(sched.rows[1].interest, dec!(100));
        assert_eq!(sched.rows[1].remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_invalid_terms_rejected() {
        let mut terms = sample_terms();
        terms.term_months = 0;
        assert!(amortization_schedule(&terms).is_err());

        let mut terms = sample_terms();
        terms.principal = dec!(-1);
        assert!(amortization_schedule(&terms).is_err());
    }
}
