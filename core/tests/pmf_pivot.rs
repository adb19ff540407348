//! Product-market fit tests: seeding, lifecycle decay, pivot re-roll.
//!
//! Pivot consumes four draws in a fixed order:
//!   branch, PMF sample, warm-up delay, lifecycle months.

use runway_core::{
    config::SimConfig,
    event::SimEvent,
    pmf::{apply_pmf_decay, pivot},
    rng::{FixedRandom, ScriptedRandom, SimRng},
    state::GameState,
};

fn fresh_state(config: &SimConfig) -> GameState {
    let mut state = GameState::new(config, &mut FixedRandom(0.5));
    state.employees.clear();
    state
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── Seeding ────────────────────────────────────────────────────────

#[test]
fn initial_pmf_within_seed_range() {
    let config = SimConfig::default();
    for seed in 0..200u64 {
        let state = GameState::new(&config, &mut SimRng::new(seed));
        assert!(
            (0.1..=0.5).contains(&state.product_market_fit),
            "seed {seed} produced pmf {}",
            state.product_market_fit
        );
        assert_eq!(state.pmf_peak_value, state.product_market_fit);
        assert!((60..=180).contains(&state.pmf_lifecycle_months));
    }
}

#[test]
fn create_state_draws_pmf_launch_then_lifecycle() {
    let config = SimConfig::default();
    let mut rng = ScriptedRandom::new(vec![0.0, 1.0 - f64::EPSILON, 0.5]);
    let state = GameState::new(&config, &mut rng);

    assert_eq!(rng.draws_consumed(), 3);
    assert!(approx(state.product_market_fit, 0.1));
    assert!(state.launch_maturity < 0.0135 && state.launch_maturity > 0.0134);
    assert_eq!(state.pmf_lifecycle_months, 120);
    assert_eq!(state.month_number, 0);
    assert_eq!(state.market_ready_month, None);
    assert_eq!(state.employees.len(), 1, "founder should be hired");
}

// ── Decay ──────────────────────────────────────────────────────────

#[test]
fn pmf_decays_along_lifecycle() {
    let config = SimConfig::default();
    let mut state = fresh_state(&config);
    state.product_market_fit = 0.5;
    state.pmf_peak_value = 0.5;
    state.pmf_lifecycle_months = 60;

    apply_pmf_decay(&mut state, &config.pmf);
    assert!(approx(state.product_market_fit, 0.5 - 0.4 / 60.0));
}

#[test]
fn pmf_never_decays_below_floor() {
    let config = SimConfig::default();
    let mut state = fresh_state(&config);
    state.product_market_fit = 0.2;
    state.pmf_peak_value = 0.2;
    state.pmf_lifecycle_months = 10;

    for _ in 0..20 {
        apply_pmf_decay(&mut state, &config.pmf);
    }
    assert_eq!(state.product_market_fit, 0.1);
}

// ── Pivot ──────────────────────────────────────────────────────────

#[test]
fn pivot_resets_lifecycle() {
    let config = SimConfig::default();
    let mut state = fresh_state(&config);
    state.product_market_fit = 0.3;
    state.pmf_peak_value = 0.3;
    state.pmf_lifecycle_months = 100;

    pivot(&mut state, &config, &mut FixedRandom(0.5));
    assert!(approx(state.pmf_peak_value, 0.65), "peak {}", state.pmf_peak_value);
    assert_eq!(state.pmf_lifecycle_months, 120);
}

#[test]
fn pivot_can_improve_pmf() {
    let config = SimConfig::default();
    let mut state = fresh_state(&config);
    state.product_market_fit = 0.2;

    let event = pivot(&mut state, &config, &mut FixedRandom(0.5));
    assert!(approx(state.product_market_fit, 0.6));
    match event {
        SimEvent::Pivoted { improved, old_pmf, .. } => {
            assert!(improved);
            assert_eq!(old_pmf, 0.2);
        }
        other => panic!("expected Pivoted, got {other:?}"),
    }
}

#[test]
fn pivot_can_regress_pmf() {
    let config = SimConfig::default();
    let mut state = fresh_state(&config);
    state.product_market_fit = 0.5;

    let mut rng = ScriptedRandom::new(vec![0.8, 0.5, 0.5, 0.5]);
    pivot(&mut state, &config, &mut rng);
    assert!(approx(state.product_market_fit, 0.3));
    assert_eq!(rng.draws_consumed(), 4);
}

/// Improving samples count down from the ceiling, regressing samples
/// count up from the floor, so neither can return the old value.
#[test]
fn pivot_sample_mapping() {
    let config = SimConfig::default();

    let mut state = fresh_state(&config);
    state.product_market_fit = 0.2;
    pivot(&mut state, &config, &mut ScriptedRandom::new(vec![0.25, 0.25, 0.5, 0.5]));
    assert!(approx(state.product_market_fit, 0.8), "improved to {}", state.product_market_fit);

    let mut state = fresh_state(&config);
    state.product_market_fit = 0.2;
    pivot(&mut state, &config, &mut ScriptedRandom::new(vec![0.25, 0.0, 0.5, 0.5]));
    assert_eq!(state.product_market_fit, 1.0, "a zero draw lands on the ceiling");

    let mut state = fresh_state(&config);
    state.product_market_fit = 0.5;
    pivot(&mut state, &config, &mut ScriptedRandom::new(vec![0.9, 0.25, 0.5, 0.5]));
    assert!(approx(state.product_market_fit, 0.2), "regressed to {}", state.product_market_fit);

    let mut state = fresh_state(&config);
    state.product_market_fit = 0.5;
    pivot(&mut state, &config, &mut ScriptedRandom::new(vec![0.9, 0.0, 0.5, 0.5]));
    assert!(approx(state.product_market_fit, 0.1), "a zero draw lands on the floor");
}

/// A degenerate range snaps to the bound but still takes all four draws.
#[test]
fn pivot_at_floor_stays_at_floor() {
    let config = SimConfig::default();
    let mut state = fresh_state(&config);
    state.product_market_fit = 0.1;

    let mut rng = ScriptedRandom::new(vec![0.8, 0.5, 0.5, 0.5]);
    pivot(&mut state, &config, &mut rng);
    assert_eq!(state.product_market_fit, 0.1);
    assert_eq!(rng.draws_consumed(), 4);
}

#[test]
fn pivot_at_ceiling_stays_at_ceiling() {
    let config = SimConfig::default();
    let mut state = fresh_state(&config);
    state.product_market_fit = 1.0;

    let mut rng = ScriptedRandom::new(vec![0.1, 0.9, 0.5, 0.5]);
    pivot(&mut state, &config, &mut rng);
    assert_eq!(state.product_market_fit, 1.0);
    assert_eq!(rng.draws_consumed(), 4);
}

#[test]
fn pivot_removes_eighty_percent_of_users() {
    let config = SimConfig::default();
    let mut state = fresh_state(&config);
    state.user_cohorts.add(1000, 100.0);
    state.product_market_fit = 0.3;

    pivot(&mut state, &config, &mut FixedRandom(0.5));
    assert_eq!(state.total_users(), 200);
}

#[test]
fn pivot_removes_users_across_cohorts() {
    let config = SimConfig::default();
    let mut state = fresh_state(&config);
    state.user_cohorts.add(333, 50.0);
    state.user_cohorts.add(667, 100.0);

    let event = pivot(&mut state, &config, &mut FixedRandom(0.5));
    assert_eq!(state.total_users(), 200);
    match event {
        SimEvent::Pivoted { users_removed, .. } => assert_eq!(users_removed, 800),
        other => panic!("expected Pivoted, got {other:?}"),
    }
    assert_eq!(state.user_cohorts.len(), 2, "both cohorts keep survivors");
}

#[test]
fn pivot_costs_reputation() {
    let config = SimConfig::default();
    let mut state = fresh_state(&config);
    state.reputation = 0.5;
    state.product_market_fit = 0.3;
    pivot(&mut state, &config, &mut FixedRandom(0.5));
    assert!(approx(state.reputation, 0.35));
}

#[test]
fn pivot_reputation_floors_at_zero() {
    let config = SimConfig::default();
    let mut state = fresh_state(&config);
    state.reputation = 0.1;
    state.product_market_fit = 0.3;
    pivot(&mut state, &config, &mut FixedRandom(0.5));
    assert_eq!(state.reputation, 0.0);
}

#[test]
fn pivot_restarts_market_warm_up() {
    let config = SimConfig::default();
    let mut state = fresh_state(&config);
    state.month_number = 10;
    state.market_ready_month = Some(5);
    state.product_market_fit = 0.3;

    pivot(&mut state, &config, &mut FixedRandom(0.5));
    assert_eq!(state.market_ready_month, Some(14));
}
