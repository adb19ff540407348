//! Development phase — splits the team's output between feature work and
//! debt clean-up, then moves maturity and technical debt.
//!
//! Execution: every tick, first in registration order.
//! Feeds: raw output and the allocation split to later phases via
//!   `SimEvent::DevelopmentAllocated`.

use crate::{
    config::{DevelopmentConfig, SimConfig},
    error::SimResult,
    event::SimEvent,
    productivity::raw_output,
    rng::RandomSource,
    state::GameState,
    subsystem::SimSubsystem,
};
use serde::{Deserialize, Serialize};

/// How this month's raw output was spent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentAllocation {
    pub raw_output: f64,
    pub cleanup_fraction: f64,
    /// Effort spent on features, before conversion to maturity.
    pub raw_feature_effort: f64,
    /// Maturity gained this month.
    pub feature_output: f64,
    /// Effort spent paying down debt.
    pub cleanup_output: f64,
}

/// Share of output redirected to clean-up once debt exceeds target.
///
/// The target knob is clamped to [0, 1] here, at the point of use.
pub fn cleanup_fraction(debt: f64, target: f64, development: &DevelopmentConfig) -> f64 {
    let target = target.clamp(0.0, 1.0);
    ((debt - target) * development.cleanup_sensitivity)
        .max(0.0)
        .min(development.max_cleanup_fraction)
}

pub fn development_allocation(
    state: &GameState,
    config: &SimConfig,
    raw_output: f64,
) -> DevelopmentAllocation {
    let dev = &config.development;
    let cleanup_fraction =
        cleanup_fraction(state.technical_debt, state.technical_debt_target, dev);
    let raw_feature_effort = raw_output * (1.0 - cleanup_fraction);
    DevelopmentAllocation {
        raw_output,
        cleanup_fraction,
        raw_feature_effort,
        feature_output: raw_feature_effort / dev.productivity_divider,
        cleanup_output: raw_output * cleanup_fraction,
    }
}

/// Grow debt from feature work and shrink it from clean-up, clamped to
/// [0, max_technical_debt]. Feature work on a mature product accrues
/// debt faster.
pub fn apply_technical_debt(
    state: &mut GameState,
    development: &DevelopmentConfig,
    raw_feature_effort: f64,
    cleanup_output: f64,
) {
    let growth = raw_feature_effort
        * development.debt_growth_rate
        * (1.0 + state.product_maturity * development.debt_maturity_factor);
    let reduction = cleanup_output * development.debt_reduction_rate;
    let next = state.technical_debt - reduction + growth;
    state.technical_debt = if next.is_nan() {
        development.max_technical_debt
    } else {
        next.clamp(0.0, development.max_technical_debt)
    };
}

pub struct DevelopmentSubsystem;

impl DevelopmentSubsystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DevelopmentSubsystem {
    fn default() -> Self { Self::new() }
}

impl SimSubsystem for DevelopmentSubsystem {
    fn name(&self) -> &'static str { "development" }

    fn update(
        &mut self,
        state: &mut GameState,
        config: &SimConfig,
        _events_in: &[SimEvent],
        _rng: &mut dyn RandomSource,
    ) -> SimResult<Vec<SimEvent>> {
        let raw = raw_output(state, config);
        let alloc = development_allocation(state, config, raw);

        apply_technical_debt(
            state,
            &config.development,
            alloc.raw_feature_effort,
            alloc.cleanup_output,
        );
        state.product_maturity += alloc.feature_output;

        log::debug!(
            "month={} development: raw={:.3} cleanup={:.2} maturity={:.4} debt={:.3}",
            state.month_number,
            raw,
            alloc.cleanup_fraction,
            state.product_maturity,
            state.technical_debt
        );

        Ok(vec![SimEvent::DevelopmentAllocated {
            month: state.month_number,
            raw_output: alloc.raw_output,
            cleanup_fraction: alloc.cleanup_fraction,
            feature_output: alloc.feature_output,
            cleanup_output: alloc.cleanup_output,
            technical_debt: state.technical_debt,
            product_maturity: state.product_maturity,
        }])
    }
}
