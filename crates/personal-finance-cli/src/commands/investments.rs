use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::financial_math::InvestmentPlan;
use personal_finance_core::investments::portfolio::{self, Holding};
use personal_finance_core::investments::sip;

use crate::input;

/// Investment plan parameters
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct GrowthArgs {
    /// Lump sum invested at the start
    #[arg(long, default_value = "0")]
    pub principal: Decimal,

    /// Monthly SIP amount
    #[arg(long, alias = "sip", default_value = "0")]
    pub monthly_contribution: Decimal,

    /// Expected annual return in percent (e.g. 12)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Investment horizon in years
    #[arg(long)]
    pub years: Option<i32>,

    /// Annual step-up of the SIP in percent
    #[arg(long, default_value = "0")]
    pub step_up: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the portfolio summary
#[derive(Args)]
pub struct PortfolioArgs {
    /// Path to JSON input file with an array of holdings
    #[arg(long)]
    pub input: Option<String>,
}

fn plan_from_args(args: &GrowthArgs) -> Result<InvestmentPlan, Box<dyn std::error::Error>> {
    if let Some(plan) = input::from_file_or_stdin(args.input.as_deref())? {
        return Ok(plan);
    }
    Ok(InvestmentPlan {
        principal: args.principal,
        monthly_contribution: args.monthly_contribution,
        annual_return_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
        years: args.years.ok_or("--years is required (or provide --input)")?,
        annual_step_up_percent: args.step_up,
    })
}

pub fn run_growth(args: GrowthArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = plan_from_args(&args)?;
    let projection = plan.project()?;
    Ok(serde_json::to_value(projection)?)
}

pub fn run_investment_plan(args: GrowthArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = plan_from_args(&args)?;
    let result = sip::project_investment_plan(&plan)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_portfolio(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let holdings: Vec<Holding> = input::require(args.input.as_deref(), "portfolio summary")?;
    let result = portfolio::summarize_portfolio(&holdings)?;
    Ok(serde_json::to_value(result)?)
}
