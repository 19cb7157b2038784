use super::engine::{DEFAULT_MAX_YEARS, calculate_capital_growth_at, current_year};
use super::types::{CapitalGrowthRow, ComparisonPoint, Strategy, StrategyPoint};

/// Sum of row contributions for calendar years up to and including `year`.
pub fn cumulative_contributions(rows: &[CapitalGrowthRow], year: i32) -> f64 {
    rows.iter()
        .filter(|row| row.year <= year)
        .map(|row| row.contributions)
        .sum()
}

pub fn cumulative_contributions_by_age(rows: &[CapitalGrowthRow], age: u32) -> f64 {
    rows.iter()
        .filter(|row| row.age <= age)
        .map(|row| row.contributions)
        .sum()
}

pub fn last_row_up_to_year(rows: &[CapitalGrowthRow], year: i32) -> Option<&CapitalGrowthRow> {
    rows.iter()
        .filter(|row| row.year <= year)
        .max_by_key(|row| row.year)
}

fn last_row_up_to_age(rows: &[CapitalGrowthRow], age: u32) -> Option<&CapitalGrowthRow> {
    rows.iter().filter(|row| row.age <= age).max_by_key(|row| row.age)
}

/// Lowest and highest age present in any series.
pub fn age_range<'a, I>(series: I) -> Option<(u32, u32)>
where
    I: IntoIterator<Item = &'a [CapitalGrowthRow]>,
{
    series
        .into_iter()
        .flat_map(|rows| rows.iter().map(|row| row.age))
        .fold(None, |range, age| match range {
            None => Some((age, age)),
            Some((lo, hi)) => Some((lo.min(age), hi.max(age))),
        })
}

/// Rounded mean; 0 for no years.
pub fn average_year(years: &[i32]) -> i32 {
    if years.is_empty() {
        return 0;
    }
    let sum: i64 = years.iter().map(|&y| i64::from(y)).sum();
    (sum as f64 / years.len() as f64).round() as i32
}

pub fn prepare_growth_data(strategies: &[Strategy]) -> Vec<ComparisonPoint> {
    prepare_growth_data_at(strategies, current_year())
}

/// Projects each strategy independently and lines the series up by age.
/// A strategy whose series ended before an age carries its last capital
/// forward; one whose series starts after it is absent from that point.
pub fn prepare_growth_data_at(strategies: &[Strategy], start_year: i32) -> Vec<ComparisonPoint> {
    let series: Vec<(&Strategy, Vec<CapitalGrowthRow>)> = strategies
        .iter()
        .map(|strategy| {
            (
                strategy,
                calculate_capital_growth_at(strategy, DEFAULT_MAX_YEARS, start_year),
            )
        })
        .collect();

    let Some((min_age, max_age)) = age_range(series.iter().map(|(_, rows)| rows.as_slice())) else {
        return Vec::new();
    };

    (min_age..=max_age)
        .map(|age| {
            let mut years = Vec::new();
            let points = series
                .iter()
                .filter_map(|(strategy, rows)| {
                    let row = last_row_up_to_age(rows, age)?;
                    years.push(row.year);
                    Some(StrategyPoint {
                        strategy_id: strategy.id.clone(),
                        name: strategy.name.clone(),
                        capital: row.capital_end,
                        contributions: cumulative_contributions_by_age(rows, age),
                    })
                })
                .collect();

            ComparisonPoint {
                age,
                year: (!years.is_empty()).then(|| average_year(&years)),
                strategies: points,
            }
        })
        .collect()
}
