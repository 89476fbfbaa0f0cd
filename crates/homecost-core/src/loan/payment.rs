use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::HomeCostError;
use crate::types::{Money, Rate};
use crate::HomeCostResult;

/// Monthly payments for every principal × rate combination.
///
/// `matrix[i][j]` is the payment for `principals[i]` at `rates[j]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMatrix {
    pub principals: Vec<Money>,
    pub rates: Vec<Rate>,
    pub matrix: Vec<Vec<Money>>,
}

/// Monthly payment for a fixed-rate annuity loan:
/// `P * r(1+r)^n / ((1+r)^n - 1)` with `r = annual_rate / 12`.
///
/// A zero annual rate is the interest-free limit case and returns the
/// straight-line payment `principal / term_months`.
pub fn monthly_payment(
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
) -> HomeCostResult<Money> {
    if principal <= Decimal::ZERO {
        return Err(HomeCostError::InvalidInput {
            field: "principal".into(),
            reason: "Loan principal must be positive".into(),
        });
    }
    validate_rate_and_term(annual_rate, term_months)?;

    Ok(principal * annuity_factor(annual_rate / dec!(12), term_months)?)
}

/// Payment for each rate at a fixed principal. Output order follows `rates`.
pub fn monthly_payment_by_rate(
    principal: Money,
    rates: &[Rate],
    term_months: u32,
) -> HomeCostResult<Vec<Money>> {
    rates
        .iter()
        .map(|&rate| monthly_payment(principal, rate, term_months))
        .collect()
}

/// Payment for each principal at a fixed rate. Output order follows `principals`.
pub fn monthly_payment_by_principal(
    principals: &[Money],
    annual_rate: Rate,
    term_months: u32,
) -> HomeCostResult<Vec<Money>> {
    principals
        .iter()
        .map(|&principal| monthly_payment(principal, annual_rate, term_months))
        .collect()
}

/// Full outer product of principals × rates.
pub fn monthly_payment_matrix(
    principals: &[Money],
    rates: &[Rate],
    term_months: u32,
) -> HomeCostResult<PaymentMatrix> {
    let mut matrix = Vec::with_capacity(principals.len());
    for &principal in principals {
        let mut row = Vec::with_capacity(rates.len());
        for &rate in rates {
            row.push(monthly_payment(principal, rate, term_months)?);
        }
        matrix.push(row);
    }

    Ok(PaymentMatrix {
        principals: principals.to_vec(),
        rates: rates.to_vec(),
        matrix,
    })
}

/// Payment per unit of principal for the given monthly rate and term.
///
/// Shared by the scalar payment and the bulk sweep path, which scales it by
/// arbitrary (possibly non-positive) principals.
pub(crate) fn annuity_factor(monthly_rate: Rate, term_months: u32) -> HomeCostResult<Decimal> {
    if term_months == 0 {
        return Err(HomeCostError::DivisionByZero {
            context: "annuity factor over zero periods".into(),
        });
    }

    if monthly_rate.is_zero() {
        // Interest-free: straight-line repayment
        return Ok(Decimal::ONE / Decimal::from(term_months));
    }

    // (1 + r)^n via iterative multiplication
    let mut compound = Decimal::ONE;
    for _ in 0..term_months {
        compound *= Decimal::ONE + monthly_rate;
    }

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Err(HomeCostError::DivisionByZero {
            context: "annuity payment denominator".into(),
        });
    }

    Ok(monthly_rate * compound / denominator)
}

pub(crate) fn validate_rate_and_term(annual_rate: Rate, term_months: u32) -> HomeCostResult<()> {
    if annual_rate < Decimal::ZERO {
        return Err(HomeCostError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if term_months == 0 {
        return Err(HomeCostError::InvalidInput {
            field: "term_months".into(),
            reason: "Loan term must be at least 1 month".into(),
        });
    }
    Ok(())
}
