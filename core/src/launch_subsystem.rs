//! Launch phase — detects the month maturity reaches the launch
//! threshold and schedules the market warm-up.
//!
//! Execution: every tick, after development.
//! Draws: one (warm-up delay), only in the month the warm-up is scheduled.

use crate::{
    config::{MarketConfig, SimConfig},
    error::SimResult,
    event::SimEvent,
    rng::RandomSource,
    state::GameState,
    subsystem::SimSubsystem,
    types::Month,
};

/// Months until the market answers: `base + floor(r * span)`.
pub fn warmup_delay(market: &MarketConfig, rng: &mut dyn RandomSource) -> Month {
    market.warmup_base_months + rng.next_below(market.warmup_span_months)
}

pub struct LaunchSubsystem;

impl LaunchSubsystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LaunchSubsystem {
    fn default() -> Self { Self::new() }
}

impl SimSubsystem for LaunchSubsystem {
    fn name(&self) -> &'static str { "launch" }

    fn update(
        &mut self,
        state: &mut GameState,
        config: &SimConfig,
        _events_in: &[SimEvent],
        rng: &mut dyn RandomSource,
    ) -> SimResult<Vec<SimEvent>> {
        if !state.is_launched() || state.market_ready_month.is_some() {
            return Ok(vec![]);
        }

        let ready = state.month_number + warmup_delay(&config.market, rng);
        state.market_ready_month = Some(ready);

        log::info!(
            "month={} launch: maturity {:.4} crossed {:.4}, market ready at month {ready}",
            state.month_number,
            state.product_maturity,
            state.launch_maturity
        );

        Ok(vec![SimEvent::ProductLaunched {
            month: state.month_number,
            product_maturity: state.product_maturity,
            market_ready_month: ready,
        }])
    }
}
