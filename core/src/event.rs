//! The event bus — all inter-phase communication.
//!
//! RULE: Phases hand intermediate results to later phases ONLY through
//! events (raw output, churn rate, organic users). The full list for a
//! month is returned from `SimEngine::tick` for logging and replay.

use crate::types::Month;
use serde::{Deserialize, Serialize};

/// Every event emitted during simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Engine events ──────────────────────────────
    TickStarted {
        month: Month,
    },
    TickCompleted {
        month: Month,
    },

    // ── Development ────────────────────────────────
    DevelopmentAllocated {
        month: Month,
        raw_output: f64,
        cleanup_fraction: f64,
        feature_output: f64,
        cleanup_output: f64,
        technical_debt: f64,
        product_maturity: f64,
    },

    // ── Launch ─────────────────────────────────────
    ProductLaunched {
        month: Month,
        product_maturity: f64,
        market_ready_month: Month,
    },

    // ── Market ─────────────────────────────────────
    PmfDecayed {
        month: Month,
        product_market_fit: f64,
    },
    UsersAcquired {
        month: Month,
        paid: u64,
        organic: u64,
        signup_price: f64,
    },
    UsersChurned {
        month: Month,
        churn_rate: f64,
        churned: u64,
        remaining: u64,
    },

    // ── Finance ────────────────────────────────────
    FinancesSettled {
        month: Month,
        income: f64,
        expense: f64,
        cash: f64,
    },
    BankruptcyDeclared {
        month: Month,
        cash: f64,
    },

    // ── Drift ──────────────────────────────────────
    DriftApplied {
        month: Month,
        reputation: f64,
        mean_motivation: f64,
    },

    // ── Player operations ──────────────────────────
    Pivoted {
        month: Month,
        improved: bool,
        old_pmf: f64,
        new_pmf: f64,
        users_removed: u64,
        market_ready_month: Month,
        pmf_lifecycle_months: u64,
    },
}

impl SimEvent {
    /// Stable string name, matching the serde tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            SimEvent::TickStarted { .. }          => "tick_started",
            SimEvent::TickCompleted { .. }        => "tick_completed",
            SimEvent::DevelopmentAllocated { .. } => "development_allocated",
            SimEvent::ProductLaunched { .. }      => "product_launched",
            SimEvent::PmfDecayed { .. }           => "pmf_decayed",
            SimEvent::UsersAcquired { .. }        => "users_acquired",
            SimEvent::UsersChurned { .. }         => "users_churned",
            SimEvent::FinancesSettled { .. }      => "finances_settled",
            SimEvent::BankruptcyDeclared { .. }   => "bankruptcy_declared",
            SimEvent::DriftApplied { .. }         => "drift_applied",
            SimEvent::Pivoted { .. }              => "pivoted",
        }
    }
}
