pub mod error;
pub mod types;

#[cfg(feature = "loan")]
pub mod loan;

#[cfg(feature = "electricity")]
pub mod electricity;

#[cfg(feature = "household")]
pub mod household;

#[cfg(feature = "sweep")]
pub mod sweep;

pub use error::HomeCostError;
pub use types::*;

/// Standard result type for all homecost operations
pub type HomeCostResult<T> = Result<T, HomeCostError>;
