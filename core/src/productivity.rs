//! Team output: per-employee productivity and the team's raw output.
//!
//! Pure functions of state and config; nothing here mutates.

use crate::{
    config::{DevelopmentConfig, OnboardingConfig, SimConfig},
    state::{Employee, GameState},
};

/// Stepped ramp: first month, second month, then fully ramped.
pub fn onboarding_multiplier(months_employed: u64, onboarding: &OnboardingConfig) -> f64 {
    match months_employed {
        0 => onboarding.first_month,
        1 => onboarding.second_month,
        _ => onboarding.ramped,
    }
}

/// One employee's contribution this month.
pub fn employee_productivity(employee: &Employee, onboarding: &OnboardingConfig) -> f64 {
    employee.base_productivity
        * employee.motivation
        * onboarding_multiplier(employee.months_employed, onboarding)
}

/// Pairwise communication lines among `n` people: n(n-1)/2.
pub fn communication_lines(n: usize) -> u64 {
    let n = n as u64;
    n * n.saturating_sub(1) / 2
}

/// Fraction of output left after communication overhead, never below 0.
pub fn communication_factor(n: usize, development: &DevelopmentConfig) -> f64 {
    (1.0 - communication_lines(n) as f64 * development.overhead_per_line).max(0.0)
}

/// Raw team output: summed productivity, discounted by communication
/// overhead and by `(1 - debt)^2`.
pub fn raw_output(state: &GameState, config: &SimConfig) -> f64 {
    let collective: f64 = state
        .employees
        .iter()
        .map(|e| employee_productivity(e, &config.onboarding))
        .sum();
    let overhead = communication_factor(state.employees.len(), &config.development);
    let debt_drag = (1.0 - state.technical_debt).powi(2);
    collective * overhead * debt_drag
}
