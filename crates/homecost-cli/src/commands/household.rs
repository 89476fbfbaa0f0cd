use clap::Args;
use serde_json::Value;

use homecost_core::household::breakdown::{household_breakdown, HouseholdInput};

use crate::input;

/// Arguments for the two-party household breakdown
#[derive(Args)]
pub struct HouseholdArgs {
    /// Path to a JSON or YAML file with the household input
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_household(args: HouseholdArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let household: HouseholdInput = match args.input {
        Some(path) => input::file::read_input(&path)?,
        None => match input::stdin::read_stdin()? {
            Some(value) => serde_json::from_value(value)?,
            None => {
                return Err(
                    "No household input: pass --input <file> or pipe JSON on stdin".into(),
                )
            }
        },
    };

    let result = household_breakdown(&household)?;
    Ok(serde_json::to_value(result)?)
}
