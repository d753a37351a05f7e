use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::budget::limits::{self, BudgetLimit};
use personal_finance_core::financial_math;

use crate::input;

/// Arguments for the monthly surplus
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SurplusArgs {
    /// Monthly income
    #[arg(long)]
    pub income: Decimal,

    /// Monthly expenses
    #[arg(long)]
    pub expenses: Decimal,
}

/// Arguments for the budget summary
#[derive(Args)]
pub struct BudgetArgs {
    /// Path to JSON input file with an array of category limits
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_surplus(args: SurplusArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let surplus = financial_math::calculate_monthly_surplus(args.income, args.expenses);
    Ok(serde_json::json!({ "monthly_surplus": surplus }))
}

pub fn run_budget(args: BudgetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let items: Vec<BudgetLimit> = input::require(args.input.as_deref(), "budget summary")?;
    let result = limits::summarize_budget(&items)?;
    Ok(serde_json::to_value(result)?)
}
