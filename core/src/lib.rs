//! runway-core: a deterministic, month-by-month startup simulation.
//!
//! A `GameState` is advanced by `SimEngine::tick`, one phase at a time
//! (see `engine` for the fixed order). Every random draw comes from a
//! caller-supplied `RandomSource`, so a seed replays a run exactly.
//! `Session` bundles engine, state and seeded stream for front ends.

pub mod cohort;
pub mod command;
pub mod config;
pub mod development_subsystem;
pub mod drift_subsystem;
pub mod engine;
pub mod error;
pub mod event;
pub mod finance_subsystem;
pub mod launch_subsystem;
pub mod market_subsystem;
pub mod pmf;
pub mod productivity;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod subsystem;
pub mod types;
