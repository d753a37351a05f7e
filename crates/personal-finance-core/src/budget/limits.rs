use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PersonalFinanceError;
use crate::financial_math::{checked, checked_sum};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::PersonalFinanceResult;

const WARNING_THRESHOLD: Percent = dec!(70);
const CRITICAL_THRESHOLD: Percent = dec!(90);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Monthly spending limit for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLimit {
    pub category: String,
    pub limit: Money,
    pub spent: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Critical,
}

impl BudgetStatus {
    /// Band a usage percentage: 90 and above is critical, 70 and above a warning.
    pub fn from_usage(usage_percent: Percent) -> Self {
        if usage_percent >= CRITICAL_THRESHOLD {
            BudgetStatus::Critical
        } else if usage_percent >= WARNING_THRESHOLD {
            BudgetStatus::Warning
        } else {
            BudgetStatus::OnTrack
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryUsage {
    pub category: String,
    pub limit: Money,
    pub spent: Money,
    pub remaining: Money,
    pub spent_percent: Percent,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_budget: Money,
    pub total_spent: Money,
    pub remaining: Money,
    pub usage_percent: Percent,
    pub status: BudgetStatus,
    pub categories: Vec<CategoryUsage>,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Share of a limit already spent, capped at 100.
pub fn spent_percentage(spent: Money, limit: Money) -> PersonalFinanceResult<Percent> {
    if limit.is_zero() {
        return Err(PersonalFinanceError::invalid("limit", "limit must be non-zero"));
    }
    let ratio = checked(spent.checked_div(limit), "spent percentage")?;
    checked(ratio.min(Decimal::ONE).checked_mul(dec!(100)), "spent percentage")
}

pub fn summarize_budget(
    limits: &[BudgetLimit],
) -> PersonalFinanceResult<ComputationOutput<BudgetSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if limits.is_empty() {
        return Err(PersonalFinanceError::invalid("limits", "at least one budget limit is required"));
    }

    let mut categories = Vec::with_capacity(limits.len());
    for item in limits {
        if item.limit <= Decimal::ZERO {
            return Err(PersonalFinanceError::invalid(
                "limit",
                format!("limit for '{}' must be > 0", item.category),
            ));
        }
        let spent_percent = spent_percentage(item.spent, item.limit)?.round_dp(2);
        if item.spent > item.limit {
            warnings.push(format!(
                "'{}' is over budget by {}",
                item.category,
                item.spent - item.limit
            ));
        }
        categories.push(CategoryUsage {
            category: item.category.clone(),
            limit: item.limit,
            spent: item.spent,
            remaining: checked(item.limit.checked_sub(item.spent), "remaining budget")?,
            spent_percent,
            status: BudgetStatus::from_usage(spent_percent),
        });
    }

    let total_budget = checked_sum(limits.iter().map(|l| l.limit), "total budget")?;
    let total_spent = checked_sum(limits.iter().map(|l| l.spent), "total spent")?;
    let usage_percent = spent_percentage(total_spent, total_budget)?.round_dp(2);

    let output = BudgetSummary {
        total_budget,
        total_spent,
        remaining: checked(total_budget.checked_sub(total_spent), "remaining budget")?,
        usage_percent,
        status: BudgetStatus::from_usage(usage_percent),
        categories,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Category budget usage with 70% / 90% status bands",
        &serde_json::json!({
            "warning_threshold": WARNING_THRESHOLD.to_string(),
            "critical_threshold": CRITICAL_THRESHOLD.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
