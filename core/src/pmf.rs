//! Product-market fit: lifecycle decay and the pivot re-roll.
//!
//! PMF is hidden from the player. It only surfaces through acquisition
//! cost: the lower it is, the more each paid user costs.

use crate::{
    config::{PmfConfig, SimConfig},
    event::SimEvent,
    launch_subsystem::warmup_delay,
    rng::RandomSource,
    state::GameState,
};

/// Monthly decay rate: the climb from the floor to the peak, spread
/// evenly over the lifecycle.
pub fn decay_rate(state: &GameState, pmf: &PmfConfig) -> f64 {
    let months = state.pmf_lifecycle_months.max(1) as f64;
    ((state.pmf_peak_value - pmf.floor) / months).max(0.0)
}

/// One month of decay. Never drops below the floor.
pub fn apply_pmf_decay(state: &mut GameState, pmf: &PmfConfig) {
    let rate = decay_rate(state, pmf);
    state.product_market_fit = (state.product_market_fit - rate)
        .max(pmf.floor)
        .min(pmf.ceiling);
}

/// Re-roll PMF, discarding most users and some reputation, and restart
/// the market warm-up.
///
/// Draws, in order: branch, PMF sample, warm-up delay, lifecycle months.
/// All four are taken even when the sampling range is degenerate.
pub fn pivot(state: &mut GameState, config: &SimConfig, rng: &mut dyn RandomSource) -> SimEvent {
    let pmf = &config.pmf;
    let old_pmf = state.product_market_fit;

    let improved = rng.next_f64() < pmf.pivot_improve_probability;
    let sample = rng.next_f64();
    let drawn = if improved {
        // (old, ceiling]
        let range = pmf.ceiling - old_pmf;
        if range > 0.0 { pmf.ceiling - sample * range } else { pmf.ceiling }
    } else {
        // [floor, old)
        let range = old_pmf - pmf.floor;
        if range > 0.0 { pmf.floor + sample * range } else { pmf.floor }
    };
    let new_pmf = drawn.clamp(pmf.floor, pmf.ceiling);

    let ready = state.month_number + warmup_delay(&config.market, rng);
    let lifecycle = pmf.lifecycle_base_months + rng.next_below(pmf.lifecycle_span_months);

    state.product_market_fit = new_pmf;
    state.pmf_peak_value = new_pmf;
    state.pmf_lifecycle_months = lifecycle;
    state.market_ready_month = Some(ready);

    let to_remove = (state.total_users() as f64 * pmf.pivot_user_loss).floor() as u64;
    let users_removed = state.user_cohorts.remove_proportional(to_remove);
    state.reputation = (state.reputation - pmf.pivot_reputation_hit).max(0.0);

    log::info!(
        "month={} pivot: pmf {old_pmf:.3} -> {new_pmf:.3} ({}), lost {users_removed} users, market ready at {ready}",
        state.month_number,
        if improved { "improved" } else { "regressed" }
    );

    SimEvent::Pivoted {
        month: state.month_number,
        improved,
        old_pmf,
        new_pmf,
        users_removed,
        market_ready_month: ready,
        pmf_lifecycle_months: lifecycle,
    }
}
