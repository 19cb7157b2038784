use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Static reference data for an investable fund. Rates are decimal fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub yearly_return: f64,
    pub expense_ratio: f64,
}

impl Fund {
    pub fn net_yearly_return(&self) -> f64 {
        self.yearly_return - self.expense_ratio
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeEvent {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub amount: f64,
}

/// What the strategy is aiming for. Adding a variant forces every match in the
/// engine to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StrategyTarget {
    AgeBased,
    #[serde(rename_all = "camelCase")]
    GoalBased {
        goal: f64,
        #[serde(default)]
        adjust_goal_for_inflation: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub target: StrategyTarget,
    pub current_age: u32,
    pub goal_age: u32,
    pub initial_amount: f64,
    #[serde(default)]
    pub monthly_contribution: f64,
    pub selected_fund: String,
    /// Percent, e.g. 3 for 3%.
    pub inflation_rate: f64,
    /// Percent, e.g. 13 for 13%.
    pub tax_rate: f64,
    #[serde(default)]
    pub life_events: Vec<LifeEvent>,
}

impl Strategy {
    pub fn years_to_goal(&self) -> u32 {
        self.goal_age.saturating_sub(self.current_age)
    }

    pub fn goal(&self) -> Option<f64> {
        match self.target {
            StrategyTarget::AgeBased => None,
            StrategyTarget::GoalBased { goal, .. } => Some(goal),
        }
    }

    pub fn is_goal_based(&self) -> bool {
        matches!(self.target, StrategyTarget::GoalBased { .. })
    }

    pub fn life_events_at(&self, age: u32) -> Vec<LifeEvent> {
        self.life_events
            .iter()
            .filter(|event| event.age == age)
            .cloned()
            .collect()
    }
}

/// One projected year. Money fields are rounded to whole units for display;
/// the engine keeps compounding on unrounded values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalGrowthRow {
    pub year: i32,
    pub age: u32,
    pub capital_start: f64,
    pub contributions: f64,
    #[serde(rename = "return")]
    pub return_amount: f64,
    pub tax: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdrawal: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub life_events: Vec<LifeEvent>,
    pub capital_end: f64,
    pub goal_progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayCostResult {
    pub delay_years: u32,
    pub start_age: u32,
    pub current_capital: f64,
    pub delayed_capital: f64,
    pub current_age_at_goal: u32,
    pub delayed_age_at_goal: u32,
    pub current_year_at_goal: i32,
    pub delayed_year_at_goal: i32,
    pub cost: f64,
    pub cost_percentage: f64,
    pub required_initial_amount: Option<f64>,
    pub required_monthly_contribution: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfScenario {
    pub id: &'static str,
    pub name: &'static str,
    pub return_modifier: f64,
    pub rows: Vec<CapitalGrowthRow>,
    pub final_capital: f64,
    pub difference: f64,
    pub difference_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfReport {
    pub scenarios: Vec<WhatIfScenario>,
    pub base_final_capital: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySummary {
    pub final_capital: f64,
    pub total_contributions: f64,
    pub total_returns: f64,
    pub total_taxes: f64,
    pub total_withdrawals: f64,
    pub inflation_adjusted_capital: f64,
    pub years_to_goal: u32,
    pub average_yearly_return: f64,
    pub effective_return_after_inflation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyPoint {
    pub strategy_id: String,
    pub name: String,
    pub capital: f64,
    pub contributions: f64,
}

/// All strategies' values at one age, for side-by-side charts and tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonPoint {
    pub age: u32,
    pub year: Option<i32>,
    pub strategies: Vec<StrategyPoint>,
}
