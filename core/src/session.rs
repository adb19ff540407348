//! A running game: one engine, one state, one seeded random stream.
//!
//! The session is the single writer of its state. Every mutation, be it
//! a tick, a pivot or a knob change, goes through `&mut self`, so no two
//! can interleave.

use crate::{
    command::PlayerCommand,
    config::SimConfig,
    engine::SimEngine,
    error::SimResult,
    event::SimEvent,
    rng::SimRng,
    snapshot::SimSnapshot,
    state::GameState,
    types::Month,
};

pub struct Session {
    engine: SimEngine,
    state:  GameState,
    rng:    SimRng,
}

impl Session {
    pub fn new(config: SimConfig, seed: u64) -> SimResult<Self> {
        let engine = SimEngine::build(config)?;
        let mut rng = SimRng::new(seed);
        let state = engine.create_state(&mut rng);
        log::info!("session started: seed={seed}");
        Ok(Self { engine, state, rng })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &SimConfig {
        self.engine.config()
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot::capture(&self.state, self.engine.config())
    }

    pub fn tick(&mut self) -> SimResult<Vec<SimEvent>> {
        self.engine.tick(&mut self.state, &mut self.rng)
    }

    /// Advance `n` months, returning every event in order.
    pub fn run_months(&mut self, n: Month) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();
        for _ in 0..n {
            events.extend(self.tick()?);
        }
        Ok(events)
    }

    /// Apply a player command between ticks.
    pub fn apply(&mut self, command: PlayerCommand) -> SimResult<Vec<SimEvent>> {
        let dev = &self.engine.config().development;
        match command {
            PlayerCommand::SetSalesSpend { amount } => {
                self.state.sales_spend = amount.max(0.0);
            }
            PlayerCommand::SetProductPrice { price } => {
                self.state.product_price = price.max(0.0);
            }
            PlayerCommand::SetTechDebtTarget { target } => {
                self.state.technical_debt_target =
                    target.clamp(dev.debt_target_min, dev.debt_target_max);
            }
            PlayerCommand::HireDeveloper => {
                self.state
                    .add_random_developer(self.engine.config(), &mut self.rng);
            }
            PlayerCommand::HireEmployee { spec } => {
                self.state.add_employee(spec);
            }
            PlayerCommand::FireEmployee { index } => {
                self.state.remove_employee(index)?;
            }
            PlayerCommand::Pivot => {
                return Ok(vec![self.engine.pivot(&mut self.state, &mut self.rng)]);
            }
        }
        Ok(vec![])
    }
}
