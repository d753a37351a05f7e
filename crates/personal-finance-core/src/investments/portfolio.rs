use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PersonalFinanceError;
use crate::financial_math::{checked, checked_sum};
use crate::types::{round_currency, with_metadata, ComputationOutput, Money, Percent};
use crate::PersonalFinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single investment held by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub name: String,
    pub invested_amount: Money,
    pub current_value: Money,
    pub expected_return_percent: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingIncome {
    pub name: String,
    pub invested_amount: Money,
    pub expected_return_percent: Percent,
    pub annual_income: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_invested: Money,
    pub total_current_value: Money,
    pub total_annual_income: Money,
    pub unrealised_gain: Money,
    pub growth_percent: Percent,
    pub holdings: Vec<HoldingIncome>,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Simple expected yearly income on an invested amount, rounded to whole units.
pub fn expected_annual_income(
    amount: Money,
    expected_return_percent: Percent,
) -> PersonalFinanceResult<Money> {
    let income = checked(amount.checked_mul(expected_return_percent), "annual income")? / dec!(100);
    Ok(round_currency(income))
}

pub fn summarize_portfolio(
    holdings: &[Holding],
) -> PersonalFinanceResult<ComputationOutput<PortfolioSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for h in holdings {
        if h.invested_amount < Decimal::ZERO {
            return Err(PersonalFinanceError::invalid(
                "invested_amount",
                format!("'{}' has a negative invested amount", h.name),
            ));
        }
        if h.current_value < Decimal::ZERO {
            return Err(PersonalFinanceError::invalid(
                "current_value",
                format!("'{}' has a negative current value", h.name),
            ));
        }
    }

    let incomes = holdings
        .iter()
        .map(|h| {
            Ok(HoldingIncome {
                name: h.name.clone(),
                invested_amount: h.invested_amount,
                expected_return_percent: h.expected_return_percent,
                annual_income: expected_annual_income(h.invested_amount, h.expected_return_percent)?,
            })
        })
        .collect::<PersonalFinanceResult<Vec<HoldingIncome>>>()?;

    let total_invested = checked_sum(holdings.iter().map(|h| h.invested_amount), "total invested")?;
    let total_current_value =
        checked_sum(holdings.iter().map(|h| h.current_value), "total current value")?;
    let total_annual_income =
        checked_sum(incomes.iter().map(|h| h.annual_income), "total annual income")?;
    let unrealised_gain = total_current_value - total_invested;

    let growth_percent = if total_invested.is_zero() {
        warnings.push("Nothing invested; growth reported as 0%".into());
        Decimal::ZERO
    } else {
        checked(
            unrealised_gain
                .checked_div(total_invested)
                .and_then(|v| v.checked_mul(dec!(100))),
            "growth percent",
        )?
        .round_dp(2)
    };

    let output = PortfolioSummary {
        total_invested,
        total_current_value,
        total_annual_income,
        unrealised_gain,
        growth_percent,
        holdings: incomes,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Portfolio totals with simple expected annual income per holding",
        &serde_json::json!({ "holdings": holdings.len() }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(name: &str, invested: Decimal, current: Decimal, rate: Decimal) -> Holding {
        Holding {
            name: name.into(),
            invested_amount: invested,
            current_value: current,
            expected_return_percent: rate,
        }
    }

    #[test]
    fn test_expected_annual_income() {
        assert_eq!(expected_annual_income(dec!(150_000), dec!(12)).unwrap(), dec!(18_000));
        assert_eq!(expected_annual_income(dec!(1_005), dec!(7.1)).unwrap(), dec!(71));
    }

    #[test]
    fn test_summary_totals() {
        let holdings = vec![
            holding("Index fund", dec!(200_000), dec!(240_000), dec!(12)),
            holding("Gold", dec!(100_000), dec!(95_000), dec!(8)),
        ];
        let out = summarize_portfolio(&holdings).unwrap();
        let s = &out.result;
        assert_eq!(s.total_invested, dec!(300_000));
        assert_eq!(s.total_current_value, dec!(335_000));
        assert_eq!(s.total_annual_income, dec!(32_000));
        assert_eq!(s.unrealised_gain, dec!(35_000));
        assert_eq!(s.growth_percent, dec!(11.67));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_empty_portfolio() {
        let out = summarize_portfolio(&[]).unwrap();
        assert_eq!(out.result.growth_percent, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let holdings = vec![holding("Bad", dec!(-1), dec!(0), dec!(5))];
        let err = summarize_portfolio(&holdings).unwrap_err();
        assert_eq!(err.field(), Some("invested_amount"));
    }

    #[test]
    fn test_totals_past_decimal_range_are_errors() {
        let holdings = vec![
            holding("A", Decimal::MAX, Decimal::MAX, Decimal::ZERO),
            holding("B", Decimal::MAX, Decimal::MAX, Decimal::ZERO),
        ];
        let err = summarize_portfolio(&holdings).unwrap_err();
        assert!(matches!(err, PersonalFinanceError::Overflow { .. }));
    }
}
