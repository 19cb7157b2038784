use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::engine::MAX_AGE;
use super::funds::fund_by_id;
use super::types::{Strategy, StrategyTarget};
use crate::error::StrategyError;

pub const DEFAULT_CURRENT_AGE: u32 = 30;
pub const DEFAULT_GOAL_AGE: u32 = 65;
pub const DEFAULT_INITIAL_AMOUNT: f64 = 10_000.0;
pub const DEFAULT_MONTHLY_CONTRIBUTION: f64 = 500.0;
pub const DEFAULT_FUND: &str = "SPX";
pub const DEFAULT_INFLATION_RATE: f64 = 3.0;
pub const DEFAULT_TAX_RATE: f64 = 13.0;

impl Strategy {
    /// Age-based starter strategy. `name` comes from the caller so display
    /// text stays a presentation concern.
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self::with_defaults_at(name, Utc::now())
    }

    pub fn with_defaults_at(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_at,
            target: StrategyTarget::AgeBased,
            current_age: DEFAULT_CURRENT_AGE,
            goal_age: DEFAULT_GOAL_AGE,
            initial_amount: DEFAULT_INITIAL_AMOUNT,
            monthly_contribution: DEFAULT_MONTHLY_CONTRIBUTION,
            selected_fund: DEFAULT_FUND.to_string(),
            inflation_rate: DEFAULT_INFLATION_RATE,
            tax_rate: DEFAULT_TAX_RATE,
            life_events: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.current_age >= MAX_AGE {
            return Err(StrategyError::AgeOutOfRange {
                field: "currentAge",
                value: self.current_age,
                max: MAX_AGE - 1,
            });
        }
        if self.goal_age > MAX_AGE {
            return Err(StrategyError::AgeOutOfRange {
                field: "goalAge",
                value: self.goal_age,
                max: MAX_AGE,
            });
        }
        if self.goal_age <= self.current_age {
            return Err(StrategyError::GoalAgeNotAfterCurrent {
                current_age: self.current_age,
                goal_age: self.goal_age,
            });
        }

        non_negative("initialAmount", self.initial_amount)?;
        non_negative("monthlyContribution", self.monthly_contribution)?;
        percent("inflationRate", self.inflation_rate)?;
        percent("taxRate", self.tax_rate)?;

        if fund_by_id(&self.selected_fund).is_none() {
            return Err(StrategyError::UnknownFund(self.selected_fund.clone()));
        }

        if let StrategyTarget::GoalBased { goal, .. } = self.target {
            if !(goal.is_finite() && goal > 0.0) {
                return Err(StrategyError::NonPositiveGoal(goal));
            }
        }

        for event in &self.life_events {
            if event.age < self.current_age || event.age > self.goal_age {
                return Err(StrategyError::LifeEventOutsideHorizon {
                    name: event.name.clone(),
                    age: event.age,
                    current_age: self.current_age,
                    goal_age: self.goal_age,
                });
            }
            non_negative("lifeEvents.amount", event.amount)?;
        }

        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), StrategyError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(StrategyError::NegativeAmount { field, value })
    }
}

fn percent(field: &'static str, value: f64) -> Result<(), StrategyError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(StrategyError::RateOutOfRange { field, value })
    }
}

/// `"{prefix} {n + 1}"` where `n` is the largest number found in any of
/// `existing` (first run of digits per name, 0 when there is none).
pub fn next_strategy_name<S: AsRef<str>>(existing: &[S], prefix: &str) -> String {
    let last = existing
        .iter()
        .filter_map(|name| first_number(name.as_ref()))
        .max()
        .unwrap_or(0);
    format!("{prefix} {}", last.saturating_add(1))
}

fn first_number(name: &str) -> Option<u64> {
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let digits: String = name[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
