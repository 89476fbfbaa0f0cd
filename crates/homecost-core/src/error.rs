use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomeCostError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Loan limit exceeded: computed loan {loan_amount} is above the maximum allowed {limit}")]
    LoanLimitExceeded { loan_amount: Decimal, limit: Decimal },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for HomeCostError {
    fn from(e: serde_json::Error) -> Self {
        HomeCostError::SerializationError(e.to_string())
    }
}
