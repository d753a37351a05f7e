use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::financial_math::{self, LoanTerms};
use personal_finance_core::loans::emi::{self, tenure_months_from_years};

use crate::input;

/// Loan parameters shared by `emi` and `loan`
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanTermArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long, conflicts_with = "tenure_years")]
    pub tenure_months: Option<i32>,

    /// Tenure in years
    #[arg(long)]
    pub tenure_years: Option<i32>,
}

/// Arguments for the EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    #[command(flatten)]
    pub terms: LoanTermArgs,
}

/// Arguments for a full loan analysis
#[derive(Args)]
pub struct LoanArgs {
    #[command(flatten)]
    pub terms: LoanTermArgs,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

fn terms_from_args(args: &LoanTermArgs) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    let tenure_months = match (args.tenure_months, args.tenure_years) {
        (Some(months), _) => months,
        (None, Some(years)) => tenure_months_from_years(years)?,
        (None, None) => return Err("--tenure-months or --tenure-years is required".into()),
    };
    Ok(LoanTerms {
        principal: args.principal.ok_or("--principal is required")?,
        annual_rate_percent: args.rate.ok_or("--rate is required")?,
        tenure_months,
    })
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = terms_from_args(&args.terms)?;
    let emi = financial_math::calculate_emi(
        terms.principal,
        terms.annual_rate_percent,
        terms.tenure_months,
    )?;
    Ok(serde_json::json!({ "emi": emi }))
}

pub fn run_loan(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(terms) => terms,
        None => terms_from_args(&args.terms)?,
    };
    let result = emi::analyze_loan(&terms)?;
    Ok(serde_json::to_value(result)?)
}
