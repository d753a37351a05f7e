use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use personal_finance_core::financial_math::{
    self, GoalPlan, InvestmentPlan, LoanTerms, DEFAULT_EXPECTED_RETURN_PERCENT,
};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<T: serde::de::DeserializeOwned>(input_json: &str) -> NapiResult<T> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

fn render<T: serde::Serialize>(output: &T) -> NapiResult<String> {
    serde_json::to_string(output).map_err(to_napi_error)
}

fn default_expected_return() -> Decimal {
    DEFAULT_EXPECTED_RETURN_PERCENT
}

#[derive(Deserialize)]
struct ProgressInput {
    current: Decimal,
    target: Decimal,
}

#[derive(Deserialize)]
struct MonthsToGoalInput {
    target_amount: Decimal,
    current_amount: Decimal,
    monthly_contribution: Decimal,
    #[serde(default = "default_expected_return")]
    annual_return_percent: Decimal,
}

#[derive(Deserialize)]
struct SurplusInput {
    monthly_income: Decimal,
    monthly_expenses: Decimal,
}

// ---------------------------------------------------------------------------
// Financial math
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let terms: LoanTerms = parse(&input_json)?;
    let emi = terms.emi().map_err(to_napi_error)?;
    render(&emi)
}

#[napi]
pub fn calculate_investment_growth(input_json: String) -> NapiResult<String> {
    let plan: InvestmentPlan = parse(&input_json)?;
    let output = plan.project().map_err(to_napi_error)?;
    render(&output)
}

#[napi]
pub fn calculate_goal_progress(input_json: String) -> NapiResult<String> {
    let input: ProgressInput = parse(&input_json)?;
    let output = financial_math::calculate_goal_progress(input.current, input.target)
        .map_err(to_napi_error)?;
    render(&output)
}

#[napi]
pub fn calculate_months_to_goal(input_json: String) -> NapiResult<String> {
    let input: MonthsToGoalInput = parse(&input_json)?;
    let output = financial_math::calculate_months_to_goal(
        input.target_amount,
        input.current_amount,
        input.monthly_contribution,
        input.annual_return_percent,
    )
    .map_err(to_napi_error)?;
    render(&output)
}

#[napi]
pub fn calculate_goal_feasibility(input_json: String) -> NapiResult<String> {
    let plan: GoalPlan = parse(&input_json)?;
    let output = plan.feasibility().map_err(to_napi_error)?;
    render(&output)
}

#[napi]
pub fn calculate_monthly_surplus(input_json: String) -> NapiResult<String> {
    let input: SurplusInput = parse(&input_json)?;
    render(&financial_math::calculate_monthly_surplus(
        input.monthly_income,
        input.monthly_expenses,
    ))
}

// ---------------------------------------------------------------------------
// Loans & investments
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_loan(input_json: String) -> NapiResult<String> {
    let terms: LoanTerms = parse(&input_json)?;
    let output = personal_finance_core::loans::emi::analyze_loan(&terms).map_err(to_napi_error)?;
    render(&output)
}

#[napi]
pub fn project_investment_plan(input_json: String) -> NapiResult<String> {
    let plan: InvestmentPlan = parse(&input_json)?;
    let output = personal_finance_core::investments::sip::project_investment_plan(&plan)
        .map_err(to_napi_error)?;
    render(&output)
}

#[napi]
pub fn summarize_portfolio(input_json: String) -> NapiResult<String> {
    let holdings: Vec<personal_finance_core::investments::portfolio::Holding> =
        parse(&input_json)?;
    let output = personal_finance_core::investments::portfolio::summarize_portfolio(&holdings)
        .map_err(to_napi_error)?;
    render(&output)
}

// ---------------------------------------------------------------------------
// Goals, budgets & overview
// ---------------------------------------------------------------------------

#[napi]
pub fn assess_goal(input_json: String) -> NapiResult<String> {
    let input: personal_finance_core::goals::planner::GoalAssessmentInput = parse(&input_json)?;
    let output = personal_finance_core::goals::planner::assess_goal(&input).map_err(to_napi_error)?;
    render(&output)
}

#[napi]
pub fn summarize_budget(input_json: String) -> NapiResult<String> {
    let limits: Vec<personal_finance_core::budget::limits::BudgetLimit> = parse(&input_json)?;
    let output =
        personal_finance_core::budget::limits::summarize_budget(&limits).map_err(to_napi_error)?;
    render(&output)
}

#[napi]
pub fn financial_overview(input_json: String) -> NapiResult<String> {
    let input: personal_finance_core::overview::summary::OverviewInput = parse(&input_json)?;
    let output = personal_finance_core::overview::summary::financial_overview(&input)
        .map_err(to_napi_error)?;
    render(&output)
}
