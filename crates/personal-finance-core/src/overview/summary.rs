use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::budget::limits::BudgetLimit;
use crate::error::PersonalFinanceError;
use crate::financial_math::{checked, checked_sum};
use crate::investments::portfolio::Holding;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::PersonalFinanceResult;

/// Budget usage above this share of the total raises `budget_alert`.
const BUDGET_ALERT_PERCENT: Percent = dec!(80);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalBalance {
    pub name: String,
    pub target_amount: Money,
    pub current_amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewInput {
    pub holdings: Vec<Holding>,
    pub goals: Vec<GoalBalance>,
    pub budgets: Vec<BudgetLimit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialOverview {
    pub net_worth: Money,
    pub investment_growth_amount: Money,
    pub investment_growth_percent: Percent,
    pub goals_progress_percent: Percent,
    pub budget_usage_percent: Percent,
    pub budget_health_percent: Percent,
    pub budget_alert: bool,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

fn ratio_percent(numerator: Money, denominator: Money, field: &str) -> PersonalFinanceResult<Percent> {
    if denominator.is_zero() {
        return Err(PersonalFinanceError::invalid(
            field,
            format!("{field} total must be non-zero"),
        ));
    }
    let ratio = checked(
        numerator
            .checked_div(denominator)
            .and_then(|v| v.checked_mul(dec!(100))),
        field,
    )?;
    Ok(ratio.round_dp(1))
}

/// Headline figures for the dashboard across investments, goals and budgets.
pub fn financial_overview(
    input: &OverviewInput,
) -> PersonalFinanceResult<ComputationOutput<FinancialOverview>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let total_invested = checked_sum(input.holdings.iter().map(|h| h.invested_amount), "holdings")?;
    let total_value = checked_sum(input.holdings.iter().map(|h| h.current_value), "holdings")?;
    let goals_target = checked_sum(input.goals.iter().map(|g| g.target_amount), "goals")?;
    let goals_current = checked_sum(input.goals.iter().map(|g| g.current_amount), "goals")?;
    let budget_total = checked_sum(input.budgets.iter().map(|b| b.limit), "budgets")?;
    let budget_spent = checked_sum(input.budgets.iter().map(|b| b.spent), "budgets")?;

    let investment_growth_amount =
        checked(total_value.checked_sub(total_invested), "investment growth")?;
    let investment_growth_percent =
        ratio_percent(investment_growth_amount, total_invested, "holdings")?;
    let goals_progress_percent = ratio_percent(goals_current, goals_target, "goals")?;
    let budget_usage_percent = ratio_percent(budget_spent, budget_total, "budgets")?;
    let budget_alert = budget_usage_percent > BUDGET_ALERT_PERCENT;

    if investment_growth_amount < Decimal::ZERO {
        warnings.push(format!(
            "Portfolio is down {} on invested capital",
            -investment_growth_amount
        ));
    }
    if budget_alert {
        warnings.push(format!("Budget usage at {budget_usage_percent}%"));
    }

    let output = FinancialOverview {
        net_worth: checked(total_value.checked_add(goals_current), "net worth")?,
        investment_growth_amount,
        investment_growth_percent,
        goals_progress_percent,
        budget_usage_percent,
        budget_health_percent: checked(dec!(100).checked_sub(budget_usage_percent), "budgets")?,
        budget_alert,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Dashboard summary: net worth, investment growth, goal progress, budget health",
        &serde_json::json!({
            "holdings": input.holdings.len(),
            "goals": input.goals.len(),
            "budgets": input.budgets.len(),
            "budget_alert_percent": BUDGET_ALERT_PERCENT.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
