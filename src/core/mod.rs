mod comparison;
mod delay;
mod engine;
mod funds;
mod solver;
mod strategy;
mod summary;
mod types;
mod what_if;

pub use comparison::{
    age_range, average_year, cumulative_contributions, cumulative_contributions_by_age,
    last_row_up_to_year, prepare_growth_data, prepare_growth_data_at,
};
pub use delay::{
    DEFAULT_DELAY_STEP_YEARS, DEFAULT_MAX_DELAY_YEARS, calculate_delay_cost,
    calculate_delay_cost_at, calculate_delay_data_list, calculate_delay_data_list_at,
    delay_periods, effective_max_delay_years, is_valid_delay_scenario,
};
pub use engine::{
    DEFAULT_MAX_YEARS, MAX_AGE, MAX_INVESTMENT_YEARS, MAX_YEARS_TO_GOAL, StrategyParams,
    YearCapital, calculate_capital_growth, calculate_capital_growth_at, current_year,
    effective_max_years, estimate_years_to_goal, goal_based_monthly_contribution, goal_progress,
    monthly_return, projected_capital, should_stop, strategy_params, target_amount, year_capital,
};
pub use funds::{FUNDS, fund_by_id};
pub use solver::{
    CONTRIBUTION_TOLERANCE, ContributionSolve, INITIAL_AMOUNT_TOLERANCE, SolverPolicy,
    required_initial_amount, required_initial_amount_with, required_monthly_contribution,
    solve_monthly_contribution,
};
pub use strategy::next_strategy_name;
pub use summary::{summarize_rows, summarize_strategy};
pub use types::{
    CapitalGrowthRow, ComparisonPoint, DelayCostResult, Fund, LifeEvent, Strategy,
    StrategyPoint, StrategySummary, StrategyTarget, WhatIfReport, WhatIfScenario,
};
pub use what_if::{
    RETURN_MODIFIERS, ReturnModifier, generate_what_if_scenarios, generate_what_if_scenarios_at,
};
