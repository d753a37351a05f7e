pub mod error;
pub mod financial_math;
pub mod types;

#[cfg(feature = "loans")]
pub mod loans;

#[cfg(feature = "investments")]
pub mod investments;

#[cfg(feature = "goals")]
pub mod goals;

#[cfg(feature = "budget")]
pub mod budget;

#[cfg(feature = "overview")]
pub mod overview;

pub use error::PersonalFinanceError;
pub use financial_math::{
    calculate_emi, calculate_goal_feasibility, calculate_goal_progress,
    calculate_investment_growth, calculate_monthly_surplus, calculate_months_to_goal,
    GoalFeasibility, GoalPlan, InvestmentPlan, InvestmentProjection, LoanTerms, MonthsToGoal,
};
pub use types::*;

/// Standard result type for all personal-finance operations
pub type PersonalFinanceResult<T> = Result<T, PersonalFinanceError>;
