use clap::Args;
use serde_json::Value;

use personal_finance_core::overview::summary::{self, OverviewInput};

use crate::input;

/// Arguments for the dashboard overview
#[derive(Args)]
pub struct OverviewArgs {
    /// Path to JSON input file with holdings, goals and budgets
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_overview(args: OverviewArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let overview: OverviewInput = input::require(args.input.as_deref(), "financial overview")?;
    let result = summary::financial_overview(&overview)?;
    Ok(serde_json::to_value(result)?)
}
