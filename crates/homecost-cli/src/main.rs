mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::electricity::{ElectricityCostArgs, GovtSupportArgs};
use commands::household::HouseholdArgs;
use commands::loan::{PaymentArgs, PaymentMatrixArgs, ScheduleArgs};
use commands::sweep::{SweepElectricityArgs, SweepHouseholdArgs, SweepRatesArgs};

/// Housing cost projection calculations
#[derive(Parser)]
#[command(
    name = "hcc",
    version,
    about = "Housing cost projection calculations",
    long_about = "A CLI for housing cost projections with decimal precision. \
                  Supports annuity loan payments and amortization schedules, \
                  electricity costs under the government support scheme, \
                  two-party household cost breakdowns, and scenario sweeps \
                  over input ranges."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment for a fixed-rate annuity loan
    Payment(PaymentArgs),
    /// Monthly payments for every principal x rate combination
    PaymentMatrix(PaymentMatrixArgs),
    /// Full amortization schedule with cumulative columns
    Schedule(ScheduleArgs),
    /// Electricity cost for one period, government support included
    ElectricityCost(ElectricityCostArgs),
    /// Government support amount for a given usage and price
    GovtSupport(GovtSupportArgs),
    /// Two-party household cost breakdown
    Household(HouseholdArgs),
    /// Sweep electricity costs over usage and price ranges
    SweepElectricity(SweepElectricityArgs),
    /// Sweep the monthly loan payment over an interest rate range
    SweepRates(SweepRatesArgs),
    /// Sweep the household breakdown over all input ranges
    SweepHousehold(SweepHouseholdArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::PaymentMatrix(args) => commands::loan::run_payment_matrix(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::ElectricityCost(args) => commands::electricity::run_electricity_cost(args),
        Commands::GovtSupport(args) => commands::electricity::run_govt_support(args),
        Commands::Household(args) => commands::household::run_household(args),
        Commands::SweepElectricity(args) => commands::sweep::run_sweep_electricity(args),
        Commands::SweepRates(args) => commands::sweep::run_sweep_rates(args),
        Commands::SweepHousehold(args) => commands::sweep::run_sweep_household(args),
        Commands::Version => {
            println!("hcc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
