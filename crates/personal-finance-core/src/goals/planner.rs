use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PersonalFinanceError;
use crate::financial_math::{
    calculate_goal_feasibility, calculate_goal_progress, calculate_months_to_goal,
    default_expected_return, GoalFeasibility, MonthsToGoal,
};
use crate::types::{with_metadata, ComputationOutput, Money, Months, Percent};
use crate::PersonalFinanceResult;

/// Monthly amount a household is assumed able to set aside for one goal.
pub const DEFAULT_MONTHLY_CAPACITY: Money = dec!(50_000);

/// Days counted as one month when converting a deadline into a time frame.
const DAYS_PER_MONTH: i64 = 30;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for `assess_goal`. The horizon is either `time_frame_months` or a
/// `deadline` measured from `as_of`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalAssessmentInput {
    pub name: String,
    pub target_amount: Money,
    pub current_amount: Money,
    #[serde(default)]
    pub monthly_contribution: Money,
    #[serde(default)]
    pub time_frame_months: Option<Months>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    #[serde(default = "default_expected_return")]
    pub annual_return_percent: Percent,
    #[serde(default)]
    pub monthly_capacity: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalAssessment {
    pub name: String,
    pub progress_percent: Percent,
    pub remaining_amount: Money,
    pub time_frame_months: Months,
    pub months_to_goal: MonthsToGoal,
    pub feasibility: GoalFeasibility,
    pub within_capacity: bool,
    pub advice: String,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Whole months between `as_of` and `deadline`, counting 30-day months and
/// rounding up. Zero or negative when the deadline is not in the future.
pub fn time_frame_from_deadline(
    as_of: NaiveDate,
    deadline: NaiveDate,
) -> PersonalFinanceResult<Months> {
    let days = (deadline - as_of).num_days();
    let months = -(-days).div_euclid(DAYS_PER_MONTH);
    Months::try_from(months)
        .map_err(|_| PersonalFinanceError::invalid("deadline", "deadline too far from as_of"))
}

fn resolve_time_frame(input: &GoalAssessmentInput) -> PersonalFinanceResult<Months> {
    if let Some(months) = input.time_frame_months {
        return Ok(months);
    }
    let deadline = input.deadline.ok_or_else(|| {
        PersonalFinanceError::invalid(
            "time_frame_months",
            "either time_frame_months or deadline is required",
        )
    })?;
    let as_of = input
        .as_of
        .ok_or_else(|| PersonalFinanceError::invalid("as_of", "as_of is required with a deadline"))?;
    let months = time_frame_from_deadline(as_of, deadline)?;
    if months <= 0 {
        return Err(PersonalFinanceError::invalid(
            "deadline",
            format!("deadline {deadline} is not after {as_of}"),
        ));
    }
    Ok(months)
}

/// Progress, time to goal, feasibility and a capacity check for one goal.
///
/// A deadline that has already passed is rejected, never reported as an
/// unachievable goal.
pub fn assess_goal(
    input: &GoalAssessmentInput,
) -> PersonalFinanceResult<ComputationOutput<GoalAssessment>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let time_frame_months = resolve_time_frame(input)?;
    let capacity = input.monthly_capacity.unwrap_or(DEFAULT_MONTHLY_CAPACITY);

    let feasibility = calculate_goal_feasibility(
        input.target_amount,
        input.current_amount,
        input.monthly_contribution,
        time_frame_months,
        input.annual_return_percent,
    )?;
    let progress_percent =
        calculate_goal_progress(input.current_amount, input.target_amount)?.round_dp(2);
    let months_to_goal = calculate_months_to_goal(
        input.target_amount,
        input.current_amount,
        input.monthly_contribution,
        input.annual_return_percent,
    )?;

    if months_to_goal == MonthsToGoal::Unreachable {
        warnings.push("No monthly contribution: savings alone never close the gap".into());
    }

    let required = feasibility.required_monthly_contribution;
    let within_capacity = required <= capacity;
    let advice = if feasibility.is_achievable {
        format!(
            "On track: projected {} covers the target of {}",
            feasibility.projected_amount, input.target_amount
        )
    } else if within_capacity {
        format!("Invest {required} monthly to achieve this goal")
    } else {
        format!(
            "Goal might be challenging with current timeline: needs {required} monthly against a capacity of {capacity}"
        )
    };

    let output = GoalAssessment {
        name: input.name.clone(),
        progress_percent,
        remaining_amount: (input.target_amount - input.current_amount).max(Decimal::ZERO),
        time_frame_months,
        months_to_goal,
        feasibility,
        within_capacity,
        advice,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Goal feasibility: monthly compounding of savings plus contribution annuity",
        &serde_json::json!({
            "annual_return_percent": input.annual_return_percent.to_string(),
            "monthly_capacity": capacity.to_string(),
            "time_frame_months": time_frame_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}
