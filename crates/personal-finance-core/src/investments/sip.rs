use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::financial_math::{
    annuity_factor, checked, monthly_rate, InvestmentPlan, InvestmentProjection,
};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::PersonalFinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Output of `project_investment_plan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentPlanOutput {
    pub projection: InvestmentProjection,
    pub yearly: Vec<ContributionYear>,
}

/// One year's SIP stream and what it is worth at maturity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionYear {
    pub year: u32,
    pub monthly_contribution: Money,
    pub annual_contribution: Money,
    pub months_compounded: u32,
    pub value_at_maturity: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project a SIP plan and break the contributions down by year.
pub fn project_investment_plan(
    plan: &InvestmentPlan,
) -> PersonalFinanceResult<ComputationOutput<InvestmentPlanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let projection = plan.project()?;
    let rate = monthly_rate(plan.annual_return_percent, "annual_return_percent")?;
    let years = plan.years as u32;
    let step_up = Decimal::ONE + plan.annual_step_up_percent / dec!(100);

    let mut yearly = Vec::with_capacity(years as usize);
    let mut sip = plan.monthly_contribution;
    for year in 1..=years {
        let months_compounded = (years - year + 1) * 12;
        let annual = checked(sip.checked_mul(dec!(12)), "annual contribution")?;
        let value = checked(
            sip.checked_mul(annuity_factor(rate, months_compounded)?),
            "contribution growth",
        )?;
        yearly.push(ContributionYear {
            year,
            monthly_contribution: sip.round_dp(2),
            annual_contribution: annual.round_dp(2),
            months_compounded,
            value_at_maturity: value.round_dp(2),
        });
        if year < years {
            sip = checked(sip.checked_mul(step_up), "stepped-up contribution")?;
        }
    }

    if projection.total_returns < Decimal::ZERO {
        warnings.push(format!(
            "Plan loses {} over {} years",
            -projection.total_returns, plan.years
        ));
    }
    if plan.monthly_contribution.is_zero() && !plan.annual_step_up_percent.is_zero() {
        warnings.push("Step-up has no effect without a monthly contribution".into());
    }

    let output = InvestmentPlanOutput { projection, yearly };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Lump sum plus SIP with annual step-up, monthly compounding",
        &serde_json::json!({
            "principal": plan.principal.to_string(),
            "monthly_contribution": plan.monthly_contribution.to_string(),
            "annual_return_percent": plan.annual_return_percent.to_string(),
            "years": plan.years,
            "annual_step_up_percent": plan.annual_step_up_percent.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::financial_math::compound;

    fn default_plan() -> InvestmentPlan {
        InvestmentPlan {
            principal: dec!(500_000),
            monthly_contribution: dec!(5_000),
            annual_return_percent: dec!(12),
            years: 5,
            annual_step_up_percent: dec!(10),
        }
    }

    #[test]
    fn test_yearly_rows_step_up() {
        let out = project_investment_plan(&default_plan()).unwrap();
        let yearly = &out.result.yearly;
        assert_eq!(yearly.len(), 5);
        assert_eq!(yearly[0].monthly_contribution, dec!(5_000));
        assert_eq!(yearly[1].monthly_contribution, dec!(5_500));
        assert_eq!(yearly[2].annual_contribution, dec!(72_600));
        let months: Vec<u32> = yearly.iter().map(|y| y.months_compounded).collect();
        assert_eq!(months, vec![60, 48, 36, 24, 12]);
    }

    #[test]
    fn test_rows_add_up_to_maturity() {
        let plan = default_plan();
        let out = project_investment_plan(&plan).unwrap();
        let lump = plan.principal * compound(dec!(0.01), 60).unwrap();
        let streams: Decimal = out.result.yearly.iter().map(|y| y.value_at_maturity).sum();
        let diff = (lump + streams - out.result.projection.maturity_amount).abs();
        assert!(diff < dec!(1), "diff={}", diff);
    }

    #[test]
    fn test_losing_plan_warns() {
        let mut plan = default_plan();
        plan.annual_return_percent = dec!(-10);
        let out = project_investment_plan(&plan).unwrap();
        assert!(out.result.projection.total_returns < Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.starts_with("Plan loses")));
    }
}
