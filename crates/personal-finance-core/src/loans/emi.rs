use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PersonalFinanceError;
use crate::financial_math::{checked, monthly_rate, LoanTerms};
use crate::types::{with_metadata, ComputationOutput, Money, Months};
use crate::PersonalFinanceResult;

/// Tenures beyond this many months get a warning.
const LONG_TENURE_MONTHS: Months = 360;
/// Longest tenure a schedule is built for (100 years).
pub const MAX_SCHEDULE_MONTHS: Months = 1_200;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Output of `analyze_loan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanAnalysis {
    pub emi: Money,
    pub total_repayment: Money,
    pub total_interest: Money,
    pub schedule: Vec<AmortizationRow>,
}

/// One month of the repayment schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Loan tenure in months for callers that collect it in years.
pub fn tenure_months_from_years(years: Months) -> PersonalFinanceResult<Months> {
    if years <= 0 {
        return Err(PersonalFinanceError::invalid("tenure_years", "tenure_years must be > 0"));
    }
    years
        .checked_mul(12)
        .ok_or_else(|| PersonalFinanceError::invalid("tenure_years", "tenure too long"))
}

/// EMI, totals and a month-by-month amortization schedule.
///
/// Interest is charged on the opening balance at the unrounded monthly rate
/// and rounded to 2 dp. The final payment clears whatever balance the rounded
/// EMI leaves behind, so the schedule always closes at exactly zero.
pub fn analyze_loan(terms: &LoanTerms) -> PersonalFinanceResult<ComputationOutput<LoanAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let emi = terms.emi()?;
    if terms.tenure_months > MAX_SCHEDULE_MONTHS {
        return Err(PersonalFinanceError::invalid(
            "tenure_months",
            format!("amortization schedule is limited to {MAX_SCHEDULE_MONTHS} months"),
        ));
    }
    let rate = monthly_rate(terms.annual_rate_percent, "annual_rate_percent")?;
    let months = terms.tenure_months as u32;

    if rate.is_zero() {
        warnings.push("Zero interest rate: EMI is straight-line principal repayment".into());
    }
    if terms.tenure_months > LONG_TENURE_MONTHS {
        warnings.push(format!(
            "Tenure of {} months exceeds {} months",
            terms.tenure_months, LONG_TENURE_MONTHS
        ));
    }

    let mut schedule = Vec::with_capacity(months as usize);
    let mut balance = terms.principal;
    let mut total_repayment = Decimal::ZERO;

    for month in 1..=months {
        let opening = balance;
        let interest = (opening * rate).round_dp(2);
        let principal = if month == months {
            opening
        } else {
            (emi - interest).min(opening)
        };
        let payment = principal + interest;
        balance = opening - principal;
        total_repayment = checked(total_repayment.checked_add(payment), "total repayment")?;

        schedule.push(AmortizationRow {
            month,
            opening_balance: opening,
            payment,
            interest,
            principal,
            closing_balance: balance,
        });
    }

    let output = LoanAnalysis {
        emi,
        total_repayment,
        total_interest: total_repayment - terms.principal,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Reducing-balance EMI with monthly amortization",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "annual_rate_percent": terms.annual_rate_percent.to_string(),
            "tenure_months": terms.tenure_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}
