use chrono::Local;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::financial_math::{self, GoalPlan, DEFAULT_EXPECTED_RETURN_PERCENT};
use personal_finance_core::goals::planner::{self, GoalAssessmentInput};

use crate::input;

/// Arguments for goal progress
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct GoalProgressArgs {
    /// Amount saved so far
    #[arg(long)]
    pub current: Decimal,

    /// Goal target amount
    #[arg(long)]
    pub target: Decimal,
}

/// Arguments for months-to-goal
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct MonthsToGoalArgs {
    /// Goal target amount
    #[arg(long)]
    pub target: Decimal,

    /// Amount saved so far
    #[arg(long, default_value = "0")]
    pub current: Decimal,

    /// Monthly contribution towards the goal
    #[arg(long)]
    pub monthly_contribution: Decimal,

    /// Expected annual return in percent
    #[arg(long, default_value_t = DEFAULT_EXPECTED_RETURN_PERCENT)]
    pub rate: Decimal,
}

/// Arguments for goal feasibility
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct GoalFeasibilityArgs {
    /// Goal target amount
    #[arg(long)]
    pub target: Option<Decimal>,

    /// Amount saved so far
    #[arg(long, default_value = "0")]
    pub current: Decimal,

    /// Monthly contribution towards the goal
    #[arg(long, default_value = "0")]
    pub monthly_contribution: Decimal,

    /// Months until the goal is due
    #[arg(long)]
    pub time_frame_months: Option<i32>,

    /// Expected annual return in percent
    #[arg(long, default_value_t = DEFAULT_EXPECTED_RETURN_PERCENT)]
    pub rate: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a full goal assessment
#[derive(Args)]
pub struct GoalArgs {
    /// Path to JSON input file with the goal
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_goal_progress(args: GoalProgressArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let progress = financial_math::calculate_goal_progress(args.current, args.target)?;
    Ok(serde_json::json!({ "progress_percent": progress }))
}

pub fn run_months_to_goal(args: MonthsToGoalArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let months = financial_math::calculate_months_to_goal(
        args.target,
        args.current,
        args.monthly_contribution,
        args.rate,
    )?;
    Ok(serde_json::json!({ "months_to_goal": months }))
}

pub fn run_goal_feasibility(args: GoalFeasibilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan: GoalPlan = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(plan) => plan,
        None => GoalPlan {
            target_amount: args.target.ok_or("--target is required (or provide --input)")?,
            current_amount: args.current,
            monthly_contribution: args.monthly_contribution,
            time_frame_months: args
                .time_frame_months
                .ok_or("--time-frame-months is required (or provide --input)")?,
            annual_return_percent: args.rate,
        },
    };
    let feasibility = plan.feasibility()?;
    Ok(serde_json::to_value(feasibility)?)
}

pub fn run_goal(args: GoalArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut goal: GoalAssessmentInput = input::require(args.input.as_deref(), "goal assessment")?;
    if goal.deadline.is_some() && goal.as_of.is_none() {
        goal.as_of = Some(Local::now().date_naive());
    }
    let result = planner::assess_goal(&goal)?;
    Ok(serde_json::to_value(result)?)
}
