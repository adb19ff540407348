//! Market phase — PMF decay, paid and organic acquisition, churn.
//!
//! Execution: every tick, after launch detection.
//! Gate: no acquisition before launch or before the market-ready month.
//! Feeds: churn rate and organic signups to drift via
//!   `SimEvent::UsersChurned` and `SimEvent::UsersAcquired`.

use crate::{
    config::{MarketConfig, SimConfig},
    error::SimResult,
    event::SimEvent,
    pmf::apply_pmf_decay,
    rng::RandomSource,
    state::GameState,
    subsystem::SimSubsystem,
};

/// Acquisition cost after price scaling and the hidden PMF penalty.
pub fn effective_cac(state: &GameState, market: &MarketConfig) -> f64 {
    state.customer_acquisition_cost * (state.product_price / market.reference_price)
        / state.product_market_fit
}

/// Users bought with this month's sales spend.
pub fn paid_new_users(state: &GameState, config: &SimConfig) -> u64 {
    if !state.is_market_open() {
        return 0;
    }
    let spend = state.sales_spend.max(0.0);
    if spend == 0.0 {
        return 0;
    }
    let cac = effective_cac(state, &config.market);
    if !(cac.is_finite() && cac > 0.0) {
        log::warn!(
            "month={} market: effective CAC {cac} unusable, no paid users",
            state.month_number
        );
        return 0;
    }
    (spend / cac).floor() as u64
}

/// Word-of-mouth signups, scaled by reputation and the current user base.
pub fn organic_new_users(state: &GameState, config: &SimConfig) -> u64 {
    if !state.is_market_open() {
        return 0;
    }
    let rate = config.market.organic_rate * state.reputation.clamp(0.0, 1.0);
    (state.total_users() as f64 * rate).floor() as u64
}

/// Monthly churn rate. Rises with debt, falls with reputation, never below 0.
pub fn churn_rate(state: &GameState, market: &MarketConfig) -> f64 {
    (market.churn_base + state.technical_debt * market.churn_debt_weight
        - state.reputation * market.churn_reputation_weight)
        .max(0.0)
}

pub fn churned_users(state: &GameState, market: &MarketConfig) -> u64 {
    (state.total_users() as f64 * churn_rate(state, market)).floor() as u64
}

pub struct MarketSubsystem;

impl MarketSubsystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarketSubsystem {
    fn default() -> Self { Self::new() }
}

impl SimSubsystem for MarketSubsystem {
    fn name(&self) -> &'static str { "market" }

    fn update(
        &mut self,
        state: &mut GameState,
        config: &SimConfig,
        _events_in: &[SimEvent],
        _rng: &mut dyn RandomSource,
    ) -> SimResult<Vec<SimEvent>> {
        let month = state.month_number;
        let mut out = Vec::with_capacity(3);

        apply_pmf_decay(state, &config.pmf);
        out.push(SimEvent::PmfDecayed {
            month,
            product_market_fit: state.product_market_fit,
        });

        if state.sales_spend < 0.0 {
            log::warn!("month={month} market: negative sales spend {} treated as 0", state.sales_spend);
        }
        let signup_price = state.product_price.max(0.0);

        // Each cohort locks in the current price.
        let paid = paid_new_users(state, config);
        state.user_cohorts.add(paid, signup_price);
        let organic = organic_new_users(state, config);
        state.user_cohorts.add(organic, signup_price);
        out.push(SimEvent::UsersAcquired { month, paid, organic, signup_price });

        let rate = churn_rate(state, &config.market);
        let churned = state
            .user_cohorts
            .remove_proportional(churned_users(state, &config.market));
        let remaining = state.total_users();
        out.push(SimEvent::UsersChurned { month, churn_rate: rate, churned, remaining });

        log::debug!(
            "month={month} market: pmf={:.3} paid={paid} organic={organic} churned={churned} ({:.1}%) users={remaining}",
            state.product_market_fit,
            rate * 100.0
        );

        Ok(out)
    }
}
