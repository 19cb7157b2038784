use tracing::{debug, warn};

use super::engine::{current_year, estimate_years_to_goal, projected_capital, strategy_params};
use super::funds::fund_by_id;
use super::solver::{required_initial_amount, required_monthly_contribution};
use super::types::{DelayCostResult, Strategy, StrategyTarget};

pub const DEFAULT_DELAY_STEP_YEARS: u32 = 3;
pub const DEFAULT_MAX_DELAY_YEARS: u32 = 30;

/// Explicit cap wins. Otherwise age-based strategies can delay up to one
/// year before the goal age; goal-based strategies use a fixed default.
pub fn effective_max_delay_years(strategy: &Strategy, max_delay_years: Option<u32>) -> u32 {
    if let Some(max) = max_delay_years {
        return max;
    }
    match strategy.target {
        StrategyTarget::AgeBased => strategy.years_to_goal().saturating_sub(1),
        StrategyTarget::GoalBased { .. } => DEFAULT_MAX_DELAY_YEARS,
    }
}

/// `step, 2*step, ...` up to and including `max_delay_years`.
pub fn delay_periods(step_years: u32, max_delay_years: u32) -> Vec<u32> {
    if step_years == 0 {
        return Vec::new();
    }
    (1u32..)
        .map_while(|k| k.checked_mul(step_years))
        .take_while(|years| *years <= max_delay_years)
        .collect()
}

pub fn is_valid_delay_scenario(strategy: &Strategy, delay_years: u32, cost: f64) -> bool {
    if cost <= 0.0 {
        return false;
    }
    match strategy.target {
        StrategyTarget::AgeBased => delay_years < strategy.years_to_goal(),
        StrategyTarget::GoalBased { .. } => true,
    }
}

pub fn calculate_delay_cost(strategy: &Strategy, delay_years: u32) -> Option<DelayCostResult> {
    calculate_delay_cost_at(strategy, delay_years, current_year())
}

/// Compares investing now against leaving the initial amount idle for
/// `delay_years` and only then starting contributions. Both paths are
/// measured at the same horizon. `None` when the fund cannot be resolved.
pub fn calculate_delay_cost_at(
    strategy: &Strategy,
    delay_years: u32,
    start_year: i32,
) -> Option<DelayCostResult> {
    let params = strategy_params(strategy)?;
    let initial = strategy.initial_amount;
    let contribution = params.monthly_contribution;
    let r = params.net_yearly_return;
    let tax = params.tax_rate;

    let horizon_years = match strategy.target {
        StrategyTarget::AgeBased => strategy.years_to_goal(),
        StrategyTarget::GoalBased { goal, .. } => {
            estimate_years_to_goal(initial, contribution, r, tax, goal)
        }
    };
    let current_capital = projected_capital(initial, contribution, r, tax, horizon_years);

    let remaining_years = horizon_years.saturating_sub(delay_years);
    let delayed_capital = if remaining_years == 0 {
        initial
    } else {
        projected_capital(initial, contribution, r, tax, remaining_years)
    };

    let delayed_years_to_goal = match strategy.target {
        StrategyTarget::AgeBased => horizon_years,
        StrategyTarget::GoalBased { goal, .. } => {
            let inflated_goal = goal * (1.0 + params.inflation_rate).powi(delay_years as i32);
            delay_years.saturating_add(estimate_years_to_goal(
                initial,
                contribution,
                r,
                tax,
                inflated_goal,
            ))
        }
    };

    // Reported and filtered in whole units.
    let cost = (current_capital - delayed_capital).round();
    let cost_percentage = if current_capital > 0.0 {
        (current_capital - delayed_capital) / current_capital * 100.0
    } else {
        0.0
    };

    let (required_initial_amount, required_monthly_contribution) =
        if remaining_years > 0 && cost > 0.0 {
            (
                Some(required_initial_amount(
                    current_capital,
                    contribution,
                    r,
                    tax,
                    remaining_years,
                )),
                Some(required_monthly_contribution(
                    current_capital,
                    initial,
                    r,
                    tax,
                    remaining_years,
                )),
            )
        } else {
            (None, None)
        };

    Some(DelayCostResult {
        delay_years,
        start_age: strategy.current_age.saturating_add(delay_years),
        current_capital: current_capital.round(),
        delayed_capital: delayed_capital.round(),
        current_age_at_goal: strategy.current_age.saturating_add(horizon_years),
        delayed_age_at_goal: strategy.current_age.saturating_add(delayed_years_to_goal),
        current_year_at_goal: start_year.saturating_add_unsigned(horizon_years),
        delayed_year_at_goal: start_year.saturating_add_unsigned(delayed_years_to_goal),
        cost,
        cost_percentage,
        required_initial_amount,
        required_monthly_contribution,
    })
}

pub fn calculate_delay_data_list(
    strategy: &Strategy,
    step_years: u32,
    max_delay_years: Option<u32>,
) -> Vec<DelayCostResult> {
    calculate_delay_data_list_at(strategy, step_years, max_delay_years, current_year())
}

pub fn calculate_delay_data_list_at(
    strategy: &Strategy,
    step_years: u32,
    max_delay_years: Option<u32>,
    start_year: i32,
) -> Vec<DelayCostResult> {
    if fund_by_id(&strategy.selected_fund).is_none() {
        warn!(
            strategy = %strategy.id,
            fund = %strategy.selected_fund,
            "unknown fund; delay cost skipped"
        );
        return Vec::new();
    }

    let max_delay = effective_max_delay_years(strategy, max_delay_years);
    let periods = delay_periods(step_years, max_delay);

    let results: Vec<DelayCostResult> = periods
        .into_iter()
        .filter_map(|delay_years| calculate_delay_cost_at(strategy, delay_years, start_year))
        .filter(|result| is_valid_delay_scenario(strategy, result.delay_years, result.cost))
        .collect();

    debug!(
        strategy = %strategy.id,
        max_delay,
        step_years,
        kept = results.len(),
        "delay cost scenarios"
    );
    results
}
