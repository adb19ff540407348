//! Drift phase — slow monthly movement of motivation and reputation,
//! then tenure.
//!
//! Execution: every tick, last in registration order.
//! Depends on: reads events_in for `UsersChurned` (churn rate) and
//!   `UsersAcquired` (organic signups) from this month's market phase.

use crate::{
    config::{DriftConfig, SimConfig},
    error::SimResult,
    event::SimEvent,
    rng::RandomSource,
    state::{Employee, GameState},
    subsystem::SimSubsystem,
};

/// Additive motivation penalties for one employee; they stack.
pub fn motivation_delta(
    employee: &Employee,
    headcount: usize,
    technical_debt: f64,
    drift: &DriftConfig,
) -> f64 {
    let mut delta = 0.0;
    if technical_debt > drift.high_debt_threshold {
        delta -= drift.high_debt_motivation_penalty;
    }
    if headcount > drift.large_team_threshold {
        delta -= drift.large_team_motivation_penalty;
    }
    if employee.months_employed > drift.long_tenure_months {
        delta -= drift.long_tenure_motivation_penalty;
    }
    delta
}

pub fn apply_motivation_drift(state: &mut GameState, drift: &DriftConfig) {
    let headcount = state.employees.len();
    let debt = state.technical_debt;
    for employee in &mut state.employees {
        let delta = motivation_delta(employee, headcount, debt, drift);
        employee.motivation =
            (employee.motivation + delta).clamp(drift.motivation_min, drift.motivation_max);
    }
}

pub fn reputation_delta(
    state: &GameState,
    churn_rate: f64,
    organic_users: u64,
    drift: &DriftConfig,
) -> f64 {
    let mut delta = 0.0;
    if state.product_maturity > drift.mature_product_threshold {
        delta += drift.mature_product_reputation_gain;
    }
    if state.technical_debt > drift.high_debt_threshold {
        delta -= drift.high_debt_reputation_penalty;
    }
    if churn_rate > drift.high_churn_threshold {
        delta -= drift.high_churn_reputation_penalty;
    }
    if organic_users > 0 {
        delta += drift.organic_growth_reputation_gain;
    }
    delta
}

pub fn apply_reputation_drift(
    state: &mut GameState,
    drift: &DriftConfig,
    churn_rate: f64,
    organic_users: u64,
) {
    let delta = reputation_delta(state, churn_rate, organic_users, drift);
    state.reputation = (state.reputation + delta).clamp(0.0, 1.0);
}

pub struct DriftSubsystem;

impl DriftSubsystem {
    pub fn new() -> Self {
        Self
    }

    /// Pull this month's churn rate and organic signups from the market events.
    fn market_signals(events_in: &[SimEvent]) -> (f64, u64) {
        let mut churn_rate = 0.0;
        let mut organic = 0;
        for event in events_in {
            match event {
                SimEvent::UsersChurned { churn_rate: rate, .. } => churn_rate = *rate,
                SimEvent::UsersAcquired { organic: n, .. } => organic = *n,
                _ => {}
            }
        }
        (churn_rate, organic)
    }
}

impl Default for DriftSubsystem {
    fn default() -> Self { Self::new() }
}

impl SimSubsystem for DriftSubsystem {
    fn name(&self) -> &'static str { "drift" }

    fn update(
        &mut self,
        state: &mut GameState,
        config: &SimConfig,
        events_in: &[SimEvent],
        _rng: &mut dyn RandomSource,
    ) -> SimResult<Vec<SimEvent>> {
        let (churn_rate, organic) = Self::market_signals(events_in);

        apply_motivation_drift(state, &config.drift);
        apply_reputation_drift(state, &config.drift, churn_rate, organic);
        for employee in &mut state.employees {
            employee.months_employed += 1;
        }

        let mean_motivation = if state.employees.is_empty() {
            0.0
        } else {
            state.employees.iter().map(|e| e.motivation).sum::<f64>()
                / state.employees.len() as f64
        };

        log::debug!(
            "month={} drift: reputation={:.3} mean_motivation={mean_motivation:.3}",
            state.month_number,
            state.reputation
        );

        Ok(vec![SimEvent::DriftApplied {
            month: state.month_number,
            reputation: state.reputation,
            mean_motivation,
        }])
    }
}
