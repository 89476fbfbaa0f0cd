pub mod electricity;
pub mod household;
pub mod loan;
pub mod sweep;
