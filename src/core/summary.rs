use super::engine::{DEFAULT_MAX_YEARS, calculate_capital_growth_at, current_year};
use super::funds::fund_by_id;
use super::types::{CapitalGrowthRow, Strategy, StrategySummary};

pub fn summarize_strategy(strategy: &Strategy) -> Option<StrategySummary> {
    let rows = calculate_capital_growth_at(strategy, DEFAULT_MAX_YEARS, current_year());
    summarize_rows(strategy, &rows)
}

/// Headline figures for an already projected row sequence. Totals are sums
/// of the rounded row values. `None` when there is nothing to summarize.
pub fn summarize_rows(strategy: &Strategy, rows: &[CapitalGrowthRow]) -> Option<StrategySummary> {
    let last = rows.last()?;
    let fund = fund_by_id(&strategy.selected_fund)?;

    let total_contributions = strategy.initial_amount
        + rows.iter().map(|row| row.contributions).sum::<f64>();
    let total_returns = rows.iter().map(|row| row.return_amount).sum();
    let total_taxes = rows.iter().map(|row| row.tax).sum();
    let total_withdrawals = rows.iter().filter_map(|row| row.withdrawal).sum();

    let years = rows.len() as u32;
    let inflation = strategy.inflation_rate / 100.0;
    let inflation_adjusted_capital = last.capital_end / (1.0 + inflation).powi(years as i32);

    let average_yearly_return = fund.yearly_return * 100.0;

    Some(StrategySummary {
        final_capital: last.capital_end,
        total_contributions,
        total_returns,
        total_taxes,
        total_withdrawals,
        inflation_adjusted_capital,
        years_to_goal: years,
        average_yearly_return,
        effective_return_after_inflation: average_yearly_return - strategy.inflation_rate,
    })
}
