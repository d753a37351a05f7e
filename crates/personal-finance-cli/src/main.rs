mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::budget::{BudgetArgs, SurplusArgs};
use commands::goals::{GoalArgs, GoalFeasibilityArgs, GoalProgressArgs, MonthsToGoalArgs};
use commands::investments::{GrowthArgs, PortfolioArgs};
use commands::loans::{EmiArgs, LoanArgs};
use commands::overview::OverviewArgs;

/// Personal finance calculations
#[derive(Parser)]
#[command(
    name = "pfm",
    version,
    about = "Personal finance calculations",
    long_about = "A CLI for personal finance calculations with decimal precision. \
                  Supports loan EMIs and amortization, SIP growth with step-up, \
                  goal progress and feasibility, budgets, and a dashboard overview."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log calculation details to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Equated monthly installment for a loan
    Emi(EmiArgs),
    /// Loan analysis with amortization schedule
    Loan(LoanArgs),
    /// Lump sum plus SIP growth with annual step-up
    Growth(GrowthArgs),
    /// Investment plan with year-by-year contributions
    InvestmentPlan(GrowthArgs),
    /// Portfolio totals and expected annual income
    Portfolio(PortfolioArgs),
    /// Goal progress as a percentage of target
    GoalProgress(GoalProgressArgs),
    /// Months of contributions needed to reach a goal
    MonthsToGoal(MonthsToGoalArgs),
    /// Whether a goal is reachable within its time frame
    GoalFeasibility(GoalFeasibilityArgs),
    /// Full goal assessment (progress, feasibility, capacity advice)
    Goal(GoalArgs),
    /// Monthly income minus expenses
    Surplus(SurplusArgs),
    /// Budget usage by category
    Budget(BudgetArgs),
    /// Dashboard summary across investments, goals and budgets
    Overview(OverviewArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::loans::run_emi(args),
        Commands::Loan(args) => commands::loans::run_loan(args),
        Commands::Growth(args) => commands::investments::run_growth(args),
        Commands::InvestmentPlan(args) => commands::investments::run_investment_plan(args),
        Commands::Portfolio(args) => commands::investments::run_portfolio(args),
        Commands::GoalProgress(args) => commands::goals::run_goal_progress(args),
        Commands::MonthsToGoal(args) => commands::goals::run_months_to_goal(args),
        Commands::GoalFeasibility(args) => commands::goals::run_goal_feasibility(args),
        Commands::Goal(args) => commands::goals::run_goal(args),
        Commands::Surplus(args) => commands::budget::run_surplus(args),
        Commands::Budget(args) => commands::budget::run_budget(args),
        Commands::Overview(args) => commands::overview::run_overview(args),
        Commands::Version => {
            println!("pfm {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            debug!(format = ?cli.output, "writing result");
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
