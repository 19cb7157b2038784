use tracing::{debug, warn};

use super::engine::{
    MAX_INVESTMENT_YEARS, ProjectionRun, StopRule, StrategyParams, current_year, monthly_return,
    project_rows, strategy_params, target_amount,
};
use super::types::{CapitalGrowthRow, Strategy, WhatIfReport, WhatIfScenario};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnModifier {
    pub id: &'static str,
    pub name: &'static str,
    pub modifier: f64,
}

/// Additive shifts to the fund's net yearly return, most pessimistic first.
pub const RETURN_MODIFIERS: [ReturnModifier; 6] = [
    ReturnModifier {
        id: "pessimistic-3",
        name: "-3%",
        modifier: -0.03,
    },
    ReturnModifier {
        id: "pessimistic-2",
        name: "-2%",
        modifier: -0.02,
    },
    ReturnModifier {
        id: "pessimistic-1",
        name: "-1%",
        modifier: -0.01,
    },
    ReturnModifier {
        id: "optimistic-1",
        name: "+1%",
        modifier: 0.01,
    },
    ReturnModifier {
        id: "optimistic-2",
        name: "+2%",
        modifier: 0.02,
    },
    ReturnModifier {
        id: "optimistic-3",
        name: "+3%",
        modifier: 0.03,
    },
];

pub fn generate_what_if_scenarios(strategy: &Strategy, base_rows: &[CapitalGrowthRow]) -> WhatIfReport {
    generate_what_if_scenarios_at(strategy, base_rows, current_year())
}

/// Reruns the projection once per [`RETURN_MODIFIERS`] entry with the base
/// contribution held fixed. Every run stops on age only, so all scenarios and
/// the base figure are measured at the same point in time; `base_rows` only
/// gates whether there is anything to compare against.
pub fn generate_what_if_scenarios_at(
    strategy: &Strategy,
    base_rows: &[CapitalGrowthRow],
    start_year: i32,
) -> WhatIfReport {
    let empty = WhatIfReport {
        scenarios: Vec::new(),
        base_final_capital: 0.0,
    };
    if base_rows.is_empty() {
        return empty;
    }
    let Some(params) = strategy_params(strategy) else {
        warn!(
            strategy = %strategy.id,
            fund = %strategy.selected_fund,
            "unknown fund; what-if skipped"
        );
        return empty;
    };

    let base_final_capital = final_capital(&modified_rows(strategy, &params, 0.0, start_year));

    let scenarios: Vec<WhatIfScenario> = RETURN_MODIFIERS
        .iter()
        .filter_map(|m| {
            let rows = modified_rows(strategy, &params, m.modifier, start_year);
            if rows.is_empty() {
                return None;
            }
            let final_capital = final_capital(&rows);
            let difference = final_capital - base_final_capital;
            let difference_percentage = if base_final_capital > 0.0 {
                difference / base_final_capital * 100.0
            } else {
                0.0
            };
            Some(WhatIfScenario {
                id: m.id,
                name: m.name,
                return_modifier: m.modifier,
                rows,
                final_capital,
                difference,
                difference_percentage,
            })
        })
        .collect();

    debug!(
        strategy = %strategy.id,
        scenarios = scenarios.len(),
        base_final_capital,
        "what-if scenarios"
    );

    WhatIfReport {
        scenarios,
        base_final_capital,
    }
}

fn modified_rows(
    strategy: &Strategy,
    params: &StrategyParams,
    modifier: f64,
    start_year: i32,
) -> Vec<CapitalGrowthRow> {
    project_rows(ProjectionRun {
        strategy,
        monthly_contribution: params.monthly_contribution,
        monthly_return: monthly_return(params.net_yearly_return + modifier),
        tax_rate: params.tax_rate,
        target_amount: target_amount(strategy, params),
        max_years: MAX_INVESTMENT_YEARS,
        start_year,
        stop: StopRule::AgeOnly,
    })
}

fn final_capital(rows: &[CapitalGrowthRow]) -> f64 {
    rows.last().map_or(0.0, |row| row.capital_end)
}
