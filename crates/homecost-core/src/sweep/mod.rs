pub mod electricity;
pub mod household;
pub mod interest;

use rust_decimal::Decimal;

use crate::error::HomeCostError;
use crate::types::SweepRange;
use crate::HomeCostResult;

/// Expand a sweep range to its value list, min to max inclusive.
pub fn range_values(range: &SweepRange) -> HomeCostResult<Vec<Decimal>> {
    if range.step <= Decimal::ZERO {
        return Err(HomeCostError::InvalidInput {
            field: "step".into(),
            reason: "Step must be positive".into(),
        });
    }
    if range.min > range.max {
        return Err(HomeCostError::InvalidInput {
            field: "min".into(),
            reason: "Min must be <= max".into(),
        });
    }

    let mut values = Vec::new();
    let mut current = range.min;
    while current <= range.max {
        values.push(current);
        current += range.step;
    }
    // Ensure max is included if the step doesn't land exactly on it
    if let Some(&last) = values.last() {
        if last < range.max {
            values.push(range.max);
        }
    }

    if values.is_empty() {
        values.push(range.min);
    }

    Ok(values)
}

pub(crate) fn require_non_empty<T>(field: &str, values: &[T]) -> HomeCostResult<()> {
    if values.is_empty() {
        return Err(HomeCostError::InvalidInput {
            field: field.into(),
            reason: "Range must contain at least one value".into(),
        });
    }
    Ok(())
}
