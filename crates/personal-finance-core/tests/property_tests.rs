use personal_finance_core::financial_math::{
    calculate_emi, calculate_goal_feasibility, calculate_goal_progress,
    calculate_investment_growth, calculate_months_to_goal, MonthsToGoal,
};
use personal_finance_core::round_currency;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// Rates are drawn in hundredths of a percent, amounts in whole currency units.
fn pct(hundredths: i64) -> Decimal {
    Decimal::new(hundredths, 2)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn emi_repays_at_least_principal(
        principal in 100_000i64..20_000_000,
        rate in 100i64..3_000,
        tenure in 1i32..=360,
    ) {
        let p = Decimal::from(principal);
        let emi = calculate_emi(p, pct(rate), tenure).unwrap();
        prop_assert!(emi * Decimal::from(tenure) >= p);
    }

    #[test]
    fn zero_rate_emi_is_rounded_straight_line(
        principal in 1i64..50_000_000,
        tenure in 1i32..=600,
    ) {
        let p = Decimal::from(principal);
        let emi = calculate_emi(p, Decimal::ZERO, tenure).unwrap();
        prop_assert_eq!(emi, round_currency(p / Decimal::from(tenure)));
    }

    #[test]
    fn investment_returns_balance_exactly(
        principal in 0i64..2_000_000,
        sip in 0i64..100_000,
        rate in -5_000i64..3_000,
        years in 1i32..=30,
        step_up in 0i64..2_500,
    ) {
        let p = calculate_investment_growth(
            Decimal::from(principal),
            Decimal::from(sip),
            pct(rate),
            years,
            pct(step_up),
        )
        .unwrap();
        prop_assert_eq!(p.total_returns, p.maturity_amount - p.total_invested);
    }

    #[test]
    fn goal_progress_monotone_and_saturating(
        target in 1i64..10_000_000,
        a in -1_000_000i64..20_000_000,
        b in -1_000_000i64..20_000_000,
    ) {
        let target = Decimal::from(target);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p_lo = calculate_goal_progress(Decimal::from(lo), target).unwrap();
        let p_hi = calculate_goal_progress(Decimal::from(hi), target).unwrap();
        prop_assert!(p_lo <= p_hi);
        prop_assert!(p_hi <= dec!(100));
        if Decimal::from(hi) >= target {
            prop_assert_eq!(p_hi, dec!(100));
        }
    }

    #[test]
    fn no_contribution_is_unreachable(
        current in 0i64..1_000_000,
        gap in 1i64..1_000_000,
        rate in -1_000i64..3_000,
    ) {
        let current = Decimal::from(current);
        let target = current + Decimal::from(gap);
        let m = calculate_months_to_goal(target, current, Decimal::ZERO, pct(rate)).unwrap();
        prop_assert_eq!(m, MonthsToGoal::Unreachable);
    }

    #[test]
    fn met_goal_needs_zero_months(
        target in 0i64..1_000_000,
        surplus in 0i64..1_000_000,
        contribution in 0i64..50_000,
        rate in -1_000i64..3_000,
    ) {
        let target = Decimal::from(target);
        let current = target + Decimal::from(surplus);
        let m = calculate_months_to_goal(target, current, Decimal::from(contribution), pct(rate))
            .unwrap();
        prop_assert_eq!(m, MonthsToGoal::Months(0));
    }

    #[test]
    fn feasibility_flags_agree(
        target in 1i64..5_000_000,
        current in 0i64..5_000_000,
        contribution in 0i64..100_000,
        months in 1i32..=240,
        rate in -1_000i64..2_500,
    ) {
        let f = calculate_goal_feasibility(
            Decimal::from(target),
            Decimal::from(current),
            Decimal::from(contribution),
            months,
            pct(rate),
        )
        .unwrap();
        prop_assert_eq!(f.is_achievable, f.shortfall.is_zero());
        prop_assert!(f.shortfall >= Decimal::ZERO);
        prop_assert!(f.required_monthly_contribution >= Decimal::ZERO);
        if f.is_achievable {
            prop_assert_eq!(f.required_monthly_contribution, Decimal::ZERO);
        } else {
            prop_assert!(f.required_monthly_contribution > Decimal::ZERO);
        }
    }

    #[test]
    fn required_contribution_reaches_target(
        target_cents in 100i64..500_000_000,
        current in 0i64..5_000_000,
        months in 1i32..=240,
        rate in -1_000i64..2_500,
    ) {
        let target = Decimal::new(target_cents, 2);
        let current = Decimal::from(current);
        let f = calculate_goal_feasibility(target, current, Decimal::ZERO, months, pct(rate))
            .unwrap();
        let retry = calculate_goal_feasibility(
            target,
            current,
            f.required_monthly_contribution,
            months,
            pct(rate),
        )
        .unwrap();
        prop_assert!(retry.is_achievable);
    }

    #[test]
    fn emi_defined_for_long_tenures(
        principal in 1_000i64..10_000_000,
        rate in 100i64..3_000,
        tenure in 1_000i32..20_000,
    ) {
        let p = Decimal::from(principal);
        let emi = calculate_emi(p, pct(rate), tenure).unwrap();
        // Never below pure interest on the principal
        prop_assert!(emi >= round_currency(p * pct(rate) / dec!(1200)));
    }
}
