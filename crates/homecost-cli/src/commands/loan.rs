use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use homecost_core::loan::payment::{monthly_payment, monthly_payment_matrix};
use homecost_core::loan::schedule::{amortization_schedule, LoanTerms};

/// Arguments for the scalar monthly payment
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate as a decimal (e.g. 0.035 for 3.5%)
    #[arg(long)]
    pub rate: Decimal,

    /// Loan term in months
    #[arg(long, default_value = "360")]
    pub term_months: u32,
}

/// Arguments for the payment outer-product matrix
#[derive(Args)]
pub struct PaymentMatrixArgs {
    /// Comma-separated loan principals (matrix rows)
    #[arg(long, value_delimiter = ',')]
    pub principals: Vec<Decimal>,

    /// Comma-separated annual rates (matrix columns)
    #[arg(long, value_delimiter = ',')]
    pub rates: Vec<Decimal>,

    /// Loan term in months
    #[arg(long, default_value = "360")]
    pub term_months: u32,
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate as a decimal
    #[arg(long)]
    pub rate: Decimal,

    /// Loan term in months
    #[arg(long, default_value = "360")]
    pub term_months: u32,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payment = monthly_payment(args.principal, args.rate, args.term_months)?;

    Ok(serde_json::json!({
        "principal": args.principal.to_string(),
        "rate": args.rate.to_string(),
        "term_months": args.term_months,
        "monthly_payment": payment.to_string(),
    }))
}

pub fn run_payment_matrix(args: PaymentMatrixArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let matrix = monthly_payment_matrix(&args.principals, &args.rates, args.term_months)?;
    Ok(serde_json::to_value(matrix)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = LoanTerms {
        principal: args.principal,
        annual_rate: args.rate,
        term_months: args.term_months,
    };
    let result = amortization_schedule(&terms)?;
    Ok(serde_json::to_value(result)?)
}
