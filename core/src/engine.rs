//! The simulation engine — advances a startup one month at a time.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   0. Month counter advances
//!   1. Development  (raw output → feature / clean-up → maturity, debt)
//!   2. Launch       (schedule market warm-up the month maturity crosses launch)
//!   3. Market       (PMF decay, paid + organic acquisition, churn)
//!   4. Finance      (income, expense, bankruptcy)
//!   5. Drift        (motivation, reputation, tenure)
//!
//! RULES:
//!   - Phases execute in registration order, every tick.
//!   - Phases pass intermediate results forward only through events.
//!   - All randomness flows through the caller's RandomSource.
//!   - The caller owns the GameState; a tick holds the only `&mut` to it.

use crate::{
    config::SimConfig,
    development_subsystem::DevelopmentSubsystem,
    drift_subsystem::DriftSubsystem,
    error::SimResult,
    event::SimEvent,
    finance_subsystem::FinanceSubsystem,
    launch_subsystem::LaunchSubsystem,
    market_subsystem::MarketSubsystem,
    pmf,
    rng::RandomSource,
    state::GameState,
    subsystem::SimSubsystem,
    types::Month,
};

pub struct SimEngine {
    config:     SimConfig,
    subsystems: Vec<Box<dyn SimSubsystem>>,
}

impl SimEngine {
    /// An engine with no phases registered.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            subsystems: Vec::new(),
        }
    }

    /// Build a fully wired engine with all phases registered.
    /// Call this instead of new() + manual register() calls.
    pub fn build(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let mut engine = SimEngine::new(config);

        // EXECUTION ORDER — fixed, documented, never reordered.
        engine.register(Box::new(DevelopmentSubsystem::new()));
        engine.register(Box::new(LaunchSubsystem::new()));
        engine.register(Box::new(MarketSubsystem::new()));
        engine.register(Box::new(FinanceSubsystem::new()));
        engine.register(Box::new(DriftSubsystem::new()));
        Ok(engine)
    }

    /// Register a phase. Call in the documented execution order.
    pub fn register(&mut self, subsystem: Box<dyn SimSubsystem>) {
        self.subsystems.push(subsystem);
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase_names(&self) -> Vec<&'static str> {
        self.subsystems.iter().map(|s| s.name()).collect()
    }

    /// Fresh state drawn from this engine's config.
    pub fn create_state(&self, rng: &mut dyn RandomSource) -> GameState {
        GameState::new(&self.config, rng)
    }

    /// Advance one month. This is the core simulation step.
    pub fn tick(
        &mut self,
        state: &mut GameState,
        rng: &mut dyn RandomSource,
    ) -> SimResult<Vec<SimEvent>> {
        state.month_number += 1;
        let month = state.month_number;
        let mut tick_events = vec![SimEvent::TickStarted { month }];

        // Each phase sees all events emitted so far this month.
        for subsystem in &mut self.subsystems {
            let new_events = subsystem.update(state, &self.config, &tick_events, rng)?;
            tick_events.extend(new_events);
        }

        tick_events.push(SimEvent::TickCompleted { month });

        if let Err(e) = state.check_invariants(&self.config) {
            log::error!("month={month} {e}");
            return Err(e);
        }
        Ok(tick_events)
    }

    /// Run n months in a loop. Used for testing and fast-forward.
    pub fn run_months(
        &mut self,
        state: &mut GameState,
        rng: &mut dyn RandomSource,
        n: Month,
    ) -> SimResult<()> {
        for _ in 0..n {
            self.tick(state, rng)?;
        }
        Ok(())
    }

    /// Explicit player operation; never part of the monthly tick.
    pub fn pivot(&self, state: &mut GameState, rng: &mut dyn RandomSource) -> SimEvent {
        pmf::pivot(state, &self.config, rng)
    }
}
