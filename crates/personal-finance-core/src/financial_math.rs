use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PersonalFinanceError;
use crate::types::{round_currency, Money, Months, Percent, Rate};
use crate::PersonalFinanceResult;

/// Expected annual return assumed for goal projections when none is given.
pub const DEFAULT_EXPECTED_RETURN_PERCENT: Percent = dec!(12);

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);
/// Absorbs ln approximation noise before taking the month ceiling.
const MONTHS_PRECISION_DP: u32 = 8;
const HALF_UNIT: Decimal = dec!(0.5);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Loan input bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub tenure_months: Months,
}

impl LoanTerms {
    pub fn emi(&self) -> PersonalFinanceResult<Money> {
        calculate_emi(self.principal, self.annual_rate_percent, self.tenure_months)
    }
}

/// Lump sum plus a monthly SIP with an optional annual step-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentPlan {
    pub principal: Money,
    pub monthly_contribution: Money,
    pub annual_return_percent: Percent,
    pub years: Months,
    #[serde(default)]
    pub annual_step_up_percent: Percent,
}

impl InvestmentPlan {
    pub fn project(&self) -> PersonalFinanceResult<InvestmentProjection> {
        calculate_investment_growth(
            self.principal,
            self.monthly_contribution,
            self.annual_return_percent,
            self.years,
            self.annual_step_up_percent,
        )
    }
}

/// Rounded outcome of an investment plan.
///
/// `total_returns == maturity_amount - total_invested` always holds and is
/// negative when the plan loses money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentProjection {
    pub maturity_amount: Money,
    pub total_invested: Money,
    pub total_returns: Money,
}

/// A savings goal with a fixed horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPlan {
    pub target_amount: Money,
    pub current_amount: Money,
    pub monthly_contribution: Money,
    pub time_frame_months: Months,
    #[serde(default = "default_expected_return")]
    pub annual_return_percent: Percent,
}

impl GoalPlan {
    pub fn feasibility(&self) -> PersonalFinanceResult<GoalFeasibility> {
        calculate_goal_feasibility(
            self.target_amount,
            self.current_amount,
            self.monthly_contribution,
            self.time_frame_months,
            self.annual_return_percent,
        )
    }

    pub fn months_to_goal(&self) -> PersonalFinanceResult<MonthsToGoal> {
        calculate_months_to_goal(
            self.target_amount,
            self.current_amount,
            self.monthly_contribution,
            self.annual_return_percent,
        )
    }
}

pub(crate) fn default_expected_return() -> Percent {
    DEFAULT_EXPECTED_RETURN_PERCENT
}

/// Projection of a goal over its time frame.
///
/// `shortfall == max(0, target - projected_amount)` and
/// `is_achievable == shortfall.is_zero()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalFeasibility {
    pub is_achievable: bool,
    pub projected_amount: Money,
    pub shortfall: Money,
    /// Total monthly contribution that would reach the target. Zero when the
    /// current plan already gets there.
    pub required_monthly_contribution: Money,
}

/// Time needed to reach a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthsToGoal {
    Months(u32),
    /// No contributions and nothing left to grow into the gap: the goal is
    /// never reached.
    Unreachable,
}

impl MonthsToGoal {
    pub fn months(self) -> Option<u32> {
        match self {
            MonthsToGoal::Months(n) => Some(n),
            MonthsToGoal::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, MonthsToGoal::Months(_))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Lift a checked Decimal operation into the crate error.
pub(crate) fn checked(value: Option<Decimal>, context: &str) -> PersonalFinanceResult<Decimal> {
    value.ok_or_else(|| PersonalFinanceError::overflow(context))
}

/// Sum amounts without panicking past Decimal range.
pub(crate) fn checked_sum<I>(values: I, context: &str) -> PersonalFinanceResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        checked(acc.checked_add(v), context)
    })
}

/// Convert an annual percentage into a monthly decimal rate.
pub fn monthly_rate(annual_percent: Percent, field: &str) -> PersonalFinanceResult<Rate> {
    let rate = annual_percent / MONTHS_PER_YEAR / PERCENT;
    if rate <= dec!(-1) {
        return Err(PersonalFinanceError::invalid(
            field,
            "Monthly rate must be greater than -100%",
        ));
    }
    Ok(rate)
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
/// Stops early once the factor stops changing at Decimal precision.
pub(crate) fn compound(rate: Rate, n: u32) -> PersonalFinanceResult<Decimal> {
    let factor = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..n {
        let next = result
            .checked_mul(factor)
            .ok_or_else(|| PersonalFinanceError::overflow(format!("(1 + {rate})^{n}")))?;
        if next == result {
            break;
        }
        result = next;
    }
    Ok(result)
}

/// Compute (1 + r)^-n by iterative division. For r > 0 this shrinks towards
/// zero, so long horizons stay in range.
pub(crate) fn discount(rate: Rate, n: u32) -> PersonalFinanceResult<Decimal> {
    let factor = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..n {
        let next = result
            .checked_div(factor)
            .ok_or_else(|| PersonalFinanceError::overflow(format!("(1 + {rate})^-{n}")))?;
        if next == result {
            break;
        }
        result = next;
    }
    Ok(result)
}

/// Future value of 1 paid at the end of each of `n` periods:
/// ((1+r)^n - 1) / r, or `n` when the rate degenerates.
pub(crate) fn annuity_factor(rate: Rate, n: u32) -> PersonalFinanceResult<Decimal> {
    if rate.is_zero() {
        debug!(n, "zero rate, annuity factor falls back to period count");
        return Ok(Decimal::from(n));
    }
    let growth = compound(rate, n)? - Decimal::ONE;
    let factor = checked(growth.checked_div(rate), "annuity factor")?;
    if factor.is_zero() {
        debug!(%rate, n, "degenerate annuity factor, falling back to period count");
        return Ok(Decimal::from(n));
    }
    Ok(factor)
}

fn positive_count(value: Months, field: &str) -> PersonalFinanceResult<u32> {
    if value <= 0 {
        return Err(PersonalFinanceError::invalid(field, format!("{field} must be > 0")));
    }
    Ok(value as u32)
}

fn non_negative(value: Money, field: &str) -> PersonalFinanceResult<()> {
    if value < Decimal::ZERO {
        return Err(PersonalFinanceError::invalid(field, format!("{field} must be >= 0")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Equated monthly installment on a reducing balance, rounded to whole units.
///
/// EMI = P · r / (1 − (1+r)^−n), with r = annual% / 12 / 100. Negative rates
/// use the equivalent P · r · (1+r)^n / ((1+r)^n − 1), whose factor shrinks.
/// A zero rate uses the limit P / n.
pub fn calculate_emi(
    principal: Money,
    annual_rate_percent: Percent,
    tenure_months: Months,
) -> PersonalFinanceResult<Money> {
    let n = positive_count(tenure_months, "tenure_months")?;
    non_negative(principal, "principal")?;
    let rate = monthly_rate(annual_rate_percent, "annual_rate_percent")?;

    if rate.is_zero() {
        debug!(tenure_months, "zero-rate EMI, using straight-line repayment");
        return Ok(round_currency(principal / Decimal::from(n)));
    }

    let (numerator, denom) = if rate > Decimal::ZERO {
        let numerator = checked(principal.checked_mul(rate), "EMI numerator")?;
        (numerator, Decimal::ONE - discount(rate, n)?)
    } else {
        let factor = compound(rate, n)?;
        let numerator = checked(
            principal.checked_mul(rate).and_then(|v| v.checked_mul(factor)),
            "EMI numerator",
        )?;
        (numerator, factor - Decimal::ONE)
    };
    if denom.is_zero() {
        debug!(%rate, tenure_months, "EMI factor degenerated to 1, using straight-line repayment");
        return Ok(round_currency(principal / Decimal::from(n)));
    }

    Ok(round_currency(checked(numerator.checked_div(denom), "EMI")?))
}

/// Project a lump sum plus a stepped-up monthly SIP.
///
/// The lump sum compounds monthly over `years * 12` months. Each year's SIP
/// stream is valued at the end of the horizon, compounding for the months
/// left including that year itself. The SIP grows by the step-up after every
/// year.
pub fn calculate_investment_growth(
    principal: Money,
    monthly_contribution: Money,
    annual_return_percent: Percent,
    years: Months,
    annual_step_up_percent: Percent,
) -> PersonalFinanceResult<InvestmentProjection> {
    let years = positive_count(years, "years")?;
    non_negative(principal, "principal")?;
    non_negative(monthly_contribution, "monthly_contribution")?;
    non_negative(annual_step_up_percent, "annual_step_up_percent")?;
    let rate = monthly_rate(annual_return_percent, "annual_return_percent")?;

    let total_months = years
        .checked_mul(12)
        .ok_or_else(|| PersonalFinanceError::invalid("years", "horizon too long"))?;
    let step_up = Decimal::ONE + annual_step_up_percent / PERCENT;

    let mut total_invested = principal;
    let mut maturity = checked(
        principal.checked_mul(compound(rate, total_months)?),
        "lump sum growth",
    )?;
    let mut sip = monthly_contribution;

    for year in 1..=years {
        let annual = checked(sip.checked_mul(MONTHS_PER_YEAR), "annual contribution")?;
        total_invested = checked(total_invested.checked_add(annual), "total invested")?;
        let remaining_months = (years - year + 1) * 12;
        let stream = checked(
            sip.checked_mul(annuity_factor(rate, remaining_months)?),
            "contribution growth",
        )?;
        maturity = checked(maturity.checked_add(stream), "maturity amount")?;
        if year < years {
            sip = checked(sip.checked_mul(step_up), "stepped-up contribution")?;
        }
    }

    let maturity_amount = round_currency(maturity);
    let total_invested = round_currency(total_invested);
    Ok(InvestmentProjection {
        maturity_amount,
        total_invested,
        total_returns: maturity_amount - total_invested,
    })
}

/// Progress towards a target as a percentage, capped at 100.
///
/// Not floored: a negative balance reports negative progress.
pub fn calculate_goal_progress(current: Money, target: Money) -> PersonalFinanceResult<Percent> {
    if target.is_zero() {
        return Err(PersonalFinanceError::invalid("target", "target must be non-zero"));
    }
    let ratio = checked(current.checked_div(target), "goal progress")?;
    checked(ratio.min(Decimal::ONE).checked_mul(PERCENT), "goal progress")
}

/// Whole months of contributions needed to close the gap between `current`
/// and `target`, solving the annuity future-value equation for n.
pub fn calculate_months_to_goal(
    target_amount: Money,
    current_amount: Money,
    monthly_contribution: Money,
    expected_return_percent: Percent,
) -> PersonalFinanceResult<MonthsToGoal> {
    non_negative(monthly_contribution, "monthly_contribution")?;
    let rate = monthly_rate(expected_return_percent, "expected_return_percent")?;

    let remaining = checked(target_amount.checked_sub(current_amount), "remaining amount")?;
    if remaining <= Decimal::ZERO {
        return Ok(MonthsToGoal::Months(0));
    }
    if monthly_contribution.is_zero() {
        return Ok(MonthsToGoal::Unreachable);
    }

    let linear = || checked(remaining.checked_div(monthly_contribution), "months to goal");
    let months = if rate.is_zero() {
        debug!("zero rate, months to goal uses linear accumulation");
        linear()?
    } else {
        let scaled = checked(
            remaining
                .checked_mul(rate)
                .and_then(|v| v.checked_div(monthly_contribution)),
            "months to goal",
        )?;
        let argument = checked(Decimal::ONE.checked_add(scaled), "months to goal")?;
        if argument <= Decimal::ZERO {
            return Err(PersonalFinanceError::invalid(
                "expected_return_percent",
                "contributions never reach the target at this rate",
            ));
        }
        let numerator = argument
            .checked_ln()
            .ok_or_else(|| PersonalFinanceError::invalid("expected_return_percent", "ln undefined"))?;
        let denominator = (Decimal::ONE + rate)
            .checked_ln()
            .ok_or_else(|| PersonalFinanceError::invalid("expected_return_percent", "ln undefined"))?;
        if denominator.is_zero() {
            linear()?
        } else {
            checked(numerator.checked_div(denominator), "months to goal")?
        }
    };

    let months = months.round_dp(MONTHS_PRECISION_DP).ceil();
    months
        .to_u32()
        .map(MonthsToGoal::Months)
        .ok_or_else(|| PersonalFinanceError::overflow("months to goal"))
}

/// Project `current_amount` and the monthly contributions over the time frame
/// and compare against the target.
///
/// The required contribution is the smallest whole amount whose rounded
/// projection reaches the target, so it is never zero for a missed goal.
pub fn calculate_goal_feasibility(
    target_amount: Money,
    current_amount: Money,
    monthly_contribution: Money,
    time_frame_months: Months,
    expected_return_percent: Percent,
) -> PersonalFinanceResult<GoalFeasibility> {
    let n = positive_count(time_frame_months, "time_frame_months")?;
    if target_amount <= Decimal::ZERO {
        return Err(PersonalFinanceError::invalid("target_amount", "target_amount must be > 0"));
    }
    non_negative(current_amount, "current_amount")?;
    non_negative(monthly_contribution, "monthly_contribution")?;
    let rate = monthly_rate(expected_return_percent, "expected_return_percent")?;

    let fv_current = checked(
        current_amount.checked_mul(compound(rate, n)?),
        "current amount growth",
    )?;
    let annuity = annuity_factor(rate, n)?;
    let fv_contributions = checked(monthly_contribution.checked_mul(annuity), "contribution growth")?;
    let projected_amount = round_currency(checked(
        fv_current.checked_add(fv_contributions),
        "projected amount",
    )?);

    let shortfall = (target_amount - projected_amount).max(Decimal::ZERO);
    let is_achievable = shortfall.is_zero();

    let required_monthly_contribution = if is_achievable {
        Decimal::ZERO
    } else {
        // Smallest unrounded projection that rounds up to the target.
        let threshold = target_amount.ceil() - HALF_UNIT;
        let gap = (threshold - fv_current).max(Decimal::ZERO);
        checked(gap.checked_div(annuity), "required contribution")?
            .ceil()
            .max(Decimal::ONE)
    };

    Ok(GoalFeasibility {
        is_achievable,
        projected_amount,
        shortfall,
        required_monthly_contribution,
    })
}

/// Income left after expenses. Negative means a deficit.
pub fn calculate_monthly_surplus(monthly_income: Money, monthly_expenses: Money) -> Money {
    monthly_income - monthly_expenses
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_emi_home_loan() {
        // 25 lakh at 8.5% over 20 years
        let emi = calculate_emi(dec!(2_500_000), dec!(8.5), 240).unwrap();
        assert_eq!(emi, dec!(21696));
    }

    #[test]
    fn test_emi_zero_rate() {
        let emi = calculate_emi(dec!(120_000), Decimal::ZERO, 12).unwrap();
        assert_eq!(emi, dec!(10_000));
        let emi = calculate_emi(dec!(100), Decimal::ZERO, 3).unwrap();
        assert_eq!(emi, dec!(33));
    }

    #[test]
    fn test_emi_rejects_non_positive_tenure() {
        for tenure in [0, -12] {
            let err = calculate_emi(dec!(100_000), dec!(9), tenure).unwrap_err();
            assert_eq!(err.field(), Some("tenure_months"));
        }
    }

    #[test]
    fn test_emi_rejects_negative_principal() {
        let err = calculate_emi(dec!(-1), dec!(9), 12).unwrap_err();
        assert_eq!(err.field(), Some("principal"));
    }

    #[test]
    fn test_emi_long_tenure_tends_to_interest_only() {
        // (1.01)^-10_000 vanishes, leaving P * r
        let emi = calculate_emi(dec!(100_000), dec!(12), 10_000).unwrap();
        assert_eq!(emi, dec!(1_000));
        let emi = calculate_emi(dec!(100_000), dec!(12), i32::MAX).unwrap();
        assert_eq!(emi, dec!(1_000));
    }

    #[test]
    fn test_emi_negative_rate() {
        // Repayment below principal, but still positive
        let emi = calculate_emi(dec!(120_000), dec!(-6), 12).unwrap();
        assert!(emi > Decimal::ZERO && emi < dec!(10_000));
    }

    #[test]
    fn test_compound_basic() {
        assert_eq!(compound(dec!(0.1), 2).unwrap(), dec!(1.21));
        assert_eq!(compound(dec!(0.1), 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_discount_inverts_compound() {
        assert_eq!(discount(dec!(0.25), 2).unwrap(), dec!(0.64));
        assert_eq!(discount(dec!(0.01), 0).unwrap(), Decimal::ONE);
        assert!(discount(dec!(0.01), 100_000).unwrap() < dec!(0.0000000001));
    }

    #[test]
    fn test_annuity_factor_zero_rate() {
        assert_eq!(annuity_factor(Decimal::ZERO, 24).unwrap(), dec!(24));
    }

    #[test]
    fn test_annuity_factor_basic() {
        // ((1.1)^2 - 1) / 0.1 = 2.1
        assert_eq!(annuity_factor(dec!(0.1), 2).unwrap(), dec!(2.1));
    }

    #[test]
    fn test_monthly_rate_bounds() {
        assert_eq!(monthly_rate(dec!(12), "r").unwrap(), dec!(0.01));
        assert!(monthly_rate(dec!(-1200), "r").is_err());
    }

    #[test]
    fn test_growth_lump_sum_only() {
        let p = calculate_investment_growth(dec!(100_000), Decimal::ZERO, dec!(12), 1, Decimal::ZERO)
            .unwrap();
        // 100_000 * 1.01^12 = 112_682.50...
        assert_eq!(p.maturity_amount, dec!(112_683));
        assert_eq!(p.total_invested, dec!(100_000));
        assert_eq!(p.total_returns, dec!(12_683));
    }

    #[test]
    fn test_growth_zero_rate_counts_remaining_months() {
        // Year 1 stream is valued over 24 months, year 2 over 12.
        let p = calculate_investment_growth(dec!(10_000), dec!(1_000), Decimal::ZERO, 2, Decimal::ZERO)
            .unwrap();
        assert_eq!(p.maturity_amount, dec!(46_000));
        assert_eq!(p.total_invested, dec!(34_000));
        assert_eq!(p.total_returns, dec!(12_000));
    }

    #[test]
    fn test_growth_step_up_raises_invested() {
        let p = calculate_investment_growth(Decimal::ZERO, dec!(1_000), Decimal::ZERO, 2, dec!(10))
            .unwrap();
        // 12_000 + 13_200
        assert_eq!(p.total_invested, dec!(25_200));
        // 1_000 * 24 + 1_100 * 12
        assert_eq!(p.maturity_amount, dec!(37_200));
    }

    #[test]
    fn test_growth_negative_returns_not_clamped() {
        let p = calculate_investment_growth(dec!(100_000), dec!(1_000), dec!(-12), 3, Decimal::ZERO)
            .unwrap();
        assert!(p.total_returns < Decimal::ZERO);
        assert_eq!(p.total_returns, p.maturity_amount - p.total_invested);
    }

    #[test]
    fn test_growth_out_of_range_is_overflow_error() {
        // SIP doubles every year for a century
        let err = calculate_investment_growth(Decimal::ZERO, dec!(10_000), dec!(12), 100, dec!(100))
            .unwrap_err();
        assert!(matches!(err, PersonalFinanceError::Overflow { .. }));
    }

    #[test]
    fn test_growth_last_step_up_not_applied() {
        // A step-up after the final year would leave range; the result does not
        let sip = Decimal::from_i128_with_scale(1_000_000_000_000_000_000_000_000_000, 0);
        let p = calculate_investment_growth(Decimal::ZERO, sip, Decimal::ZERO, 1, dec!(1000)).unwrap();
        assert_eq!(p.total_invested, sip * dec!(12));
        assert_eq!(p.maturity_amount, sip * dec!(12));
    }

    #[test]
    fn test_growth_validation() {
        let err = calculate_investment_growth(dec!(1), dec!(1), dec!(12), 0, Decimal::ZERO).unwrap_err();
        assert_eq!(err.field(), Some("years"));
        let err =
            calculate_investment_growth(dec!(1), dec!(-1), dec!(12), 1, Decimal::ZERO).unwrap_err();
        assert_eq!(err.field(), Some("monthly_contribution"));
        let err = calculate_investment_growth(dec!(1), dec!(1), dec!(12), 1, dec!(-5)).unwrap_err();
        assert_eq!(err.field(), Some("annual_step_up_percent"));
    }

    #[test]
    fn test_goal_progress() {
        assert_eq!(calculate_goal_progress(dec!(120_000), dec!(800_000)).unwrap(), dec!(15));
        assert_eq!(calculate_goal_progress(dec!(900_000), dec!(800_000)).unwrap(), dec!(100));
        assert_eq!(calculate_goal_progress(dec!(-8_000), dec!(800_000)).unwrap(), dec!(-1));
    }

    #[test]
    fn test_goal_progress_zero_target() {
        let err = calculate_goal_progress(dec!(10), Decimal::ZERO).unwrap_err();
        assert_eq!(err.field(), Some("target"));
    }

    #[test]
    fn test_months_to_goal_already_met() {
        let m = calculate_months_to_goal(dec!(100), dec!(150), Decimal::ZERO, dec!(12)).unwrap();
        assert_eq!(m, MonthsToGoal::Months(0));
    }

    #[test]
    fn test_months_to_goal_no_contribution() {
        let m = calculate_months_to_goal(dec!(100_000), dec!(10_000), Decimal::ZERO, dec!(12)).unwrap();
        assert_eq!(m, MonthsToGoal::Unreachable);
        assert_eq!(m.months(), None);
    }

    #[test]
    fn test_months_to_goal_zero_rate() {
        let m = calculate_months_to_goal(dec!(10_000), Decimal::ZERO, dec!(3_000), Decimal::ZERO)
            .unwrap();
        assert_eq!(m, MonthsToGoal::Months(4));
    }

    #[test]
    fn test_months_to_goal_with_growth() {
        // ln(1 + 100_000 * 0.01 / 5_000) / ln(1.01) = ln(1.2) / ln(1.01) = 18.32...
        let m = calculate_months_to_goal(dec!(100_000), Decimal::ZERO, dec!(5_000), dec!(12)).unwrap();
        assert_eq!(m, MonthsToGoal::Months(19));
    }

    #[test]
    fn test_months_to_goal_tiny_contribution_is_overflow_error() {
        let tiny = dec!(0.0000000000000000000000001);
        for rate in [Decimal::ZERO, dec!(12)] {
            let err = calculate_months_to_goal(dec!(1_000_000), Decimal::ZERO, tiny, rate)
                .unwrap_err();
            assert!(matches!(err, PersonalFinanceError::Overflow { .. }));
        }
    }

    #[test]
    fn test_months_to_goal_invalid_log_argument() {
        // -60% a year drains 5% a month; 1 + 100_000 * -0.05 / 1_000 < 0
        let err = calculate_months_to_goal(dec!(100_000), Decimal::ZERO, dec!(1_000), dec!(-60))
            .unwrap_err();
        assert_eq!(err.field(), Some("expected_return_percent"));
    }

    #[test]
    fn test_feasibility_zero_rate() {
        let f = calculate_goal_feasibility(dec!(10_000), dec!(1_000), dec!(500), 12, Decimal::ZERO)
            .unwrap();
        assert_eq!(f.projected_amount, dec!(7_000));
        assert_eq!(f.shortfall, dec!(3_000));
        assert!(!f.is_achievable);
        // (10_000 - 1_000) / 12
        assert_eq!(f.required_monthly_contribution, dec!(750));
    }

    #[test]
    fn test_feasibility_fractional_target_still_requires_contribution() {
        let f = calculate_goal_feasibility(dec!(10_000.4), dec!(10_000.3), Decimal::ZERO, 1, Decimal::ZERO)
            .unwrap();
        assert!(!f.is_achievable);
        assert_eq!(f.projected_amount, dec!(10_000));
        assert_eq!(f.shortfall, dec!(0.4));
        assert_eq!(f.required_monthly_contribution, Decimal::ONE);

        let retry = calculate_goal_feasibility(
            dec!(10_000.4),
            dec!(10_000.3),
            f.required_monthly_contribution,
            1,
            Decimal::ZERO,
        )
        .unwrap();
        assert!(retry.is_achievable);
    }

    #[test]
    fn test_feasibility_surplus_requires_nothing() {
        let f = calculate_goal_feasibility(dec!(10_000), dec!(20_000), Decimal::ZERO, 6, dec!(12))
            .unwrap();
        assert!(f.is_achievable);
        assert_eq!(f.shortfall, Decimal::ZERO);
        assert_eq!(f.required_monthly_contribution, Decimal::ZERO);
    }

    #[test]
    fn test_feasibility_rejects_non_positive_time_frame() {
        for months in [0, -3] {
            let err = calculate_goal_feasibility(dec!(10_000), dec!(0), dec!(500), months, dec!(12))
                .unwrap_err();
            assert_eq!(err.field(), Some("time_frame_months"));
        }
    }

    #[test]
    fn test_monthly_surplus() {
        assert_eq!(calculate_monthly_surplus(dec!(75_000), dec!(56_500)), dec!(18_500));
        assert_eq!(calculate_monthly_surplus(dec!(40_000), dec!(52_000)), dec!(-12_000));
    }
}
