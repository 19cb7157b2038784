use tracing::debug;

use super::engine::projected_capital;

/// Search stops once the initial-amount bracket is this narrow.
pub const INITIAL_AMOUNT_TOLERANCE: f64 = 1.0;
/// Search stops once the contribution bracket is this narrow (one cent).
pub const CONTRIBUTION_TOLERANCE: f64 = 0.01;

/// Bounds for the bisection loops.
///
/// The contribution search starts from an upper bound that ignores returns.
/// When returns are negative that bound can be too low to ever reach the
/// target; after `escalation_threshold_iteration` iterations, if the capital
/// projected at the upper bound is still below `escalation_ratio * target`,
/// the bound doubles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverPolicy {
    pub max_iterations: u32,
    pub escalation_threshold_iteration: u32,
    pub escalation_ratio: f64,
}

impl Default for SolverPolicy {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            escalation_threshold_iteration: 50,
            escalation_ratio: 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContributionSolve {
    pub value: f64,
    pub iterations: u32,
    pub escalations: u32,
    pub converged: bool,
}

/// Smallest whole initial amount (within one unit) that projects to
/// `target_capital` after `years`.
pub fn required_initial_amount(
    target_capital: f64,
    monthly_contribution: f64,
    yearly_return: f64,
    tax_rate: f64,
    years: u32,
) -> f64 {
    required_initial_amount_with(
        SolverPolicy::default(),
        target_capital,
        monthly_contribution,
        yearly_return,
        tax_rate,
        years,
    )
}

pub fn required_initial_amount_with(
    policy: SolverPolicy,
    target_capital: f64,
    monthly_contribution: f64,
    yearly_return: f64,
    tax_rate: f64,
    years: u32,
) -> f64 {
    if years == 0 {
        return target_capital;
    }
    if target_capital <= 0.0 {
        return 0.0;
    }

    let project =
        |initial: f64| projected_capital(initial, monthly_contribution, yearly_return, tax_rate, years);

    let mut lo = 0.0;
    let mut hi = target_capital;
    let mut it = 0;
    while hi - lo > INITIAL_AMOUNT_TOLERANCE && it < policy.max_iterations {
        it += 1;
        let mid = (lo + hi) * 0.5;
        if project(mid) < target_capital {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    debug!(target_capital, years, iterations = it, solved = hi, "required initial amount");
    hi.ceil()
}

/// Monthly contribution (rounded up to the cent) that projects
/// `initial_amount` to `target_capital` after `years`.
pub fn required_monthly_contribution(
    target_capital: f64,
    initial_amount: f64,
    yearly_return: f64,
    tax_rate: f64,
    years: u32,
) -> f64 {
    solve_monthly_contribution(
        SolverPolicy::default(),
        target_capital,
        initial_amount,
        yearly_return,
        tax_rate,
        years,
    )
    .value
}

pub fn solve_monthly_contribution(
    policy: SolverPolicy,
    target_capital: f64,
    initial_amount: f64,
    yearly_return: f64,
    tax_rate: f64,
    years: u32,
) -> ContributionSolve {
    if years == 0 || target_capital <= 0.0 {
        return ContributionSolve {
            value: 0.0,
            iterations: 0,
            escalations: 0,
            converged: true,
        };
    }

    let project =
        |contribution: f64| projected_capital(initial_amount, contribution, yearly_return, tax_rate, years);
    let months = f64::from(years) * 12.0;
    let escalation_floor = target_capital * policy.escalation_ratio;

    let mut lo = 0.0;
    let mut hi = target_capital.max(target_capital - initial_amount) / months;
    let mut it = 0;
    let mut escalations = 0;
    let mut converged = false;

    while it < policy.max_iterations {
        it += 1;
        let short = project(hi) < escalation_floor;

        if short && it > policy.escalation_threshold_iteration {
            lo = hi;
            hi *= 2.0;
            escalations += 1;
            debug!(iteration = it, upper_bound = hi, "contribution bound escalated");
            continue;
        }

        if hi - lo <= CONTRIBUTION_TOLERANCE {
            if !short {
                // Within the escalation floor but possibly still below target.
                converged = project(hi) >= target_capital;
                break;
            }
            // Collapsed onto a bound that cannot reach the target; jump to
            // the escalation window instead of idling.
            it = it.max(policy.escalation_threshold_iteration);
            continue;
        }

        let mid = (lo + hi) * 0.5;
        if project(mid) < target_capital {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    if !converged {
        debug!(
            target_capital,
            years,
            iterations = it,
            "contribution search did not reach the target; returning best estimate"
        );
    }

    ContributionSolve {
        value: round_up_to_cent(hi),
        iterations: it,
        escalations,
        converged,
    }
}

fn round_up_to_cent(value: f64) -> f64 {
    ((value * 100.0) - 1e-9).ceil().max(0.0) / 100.0
}
