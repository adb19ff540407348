//! Phase trait and registry.
//!
//! RULE: Every monthly phase implements SimSubsystem.
//! The engine calls update() on each registered phase
//! in registration order, every tick.
//! Execution order is fixed and documented in engine.rs.

use crate::{
    config::SimConfig,
    error::SimResult,
    event::SimEvent,
    rng::RandomSource,
    state::GameState,
};

/// The contract every phase must fulfill.
pub trait SimSubsystem: Send {
    /// Unique stable name for this phase.
    fn name(&self) -> &'static str;

    /// Called once per tick by the engine.
    ///
    /// - `state`:     the shared aggregate, month already advanced
    /// - `config`:    the engine's immutable tuning
    /// - `events_in`: events emitted by earlier phases this tick
    /// - `rng`:       the caller's random source
    ///
    /// Returns the new events to append to this tick's list.
    fn update(
        &mut self,
        state: &mut GameState,
        config: &SimConfig,
        events_in: &[SimEvent],
        rng: &mut dyn RandomSource,
    ) -> SimResult<Vec<SimEvent>>;
}
