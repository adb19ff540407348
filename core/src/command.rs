use crate::{state::EmployeeSpec, types::EmployeeIndex};
use serde::{Deserialize, Serialize};

/// Everything a player (or a UI standing in for one) can do between ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Knobs ──────────────────────────────────────
    SetSalesSpend { amount: f64 },
    SetProductPrice { price: f64 },
    /// Clamped to the configured caller bounds (0.1–0.9 by default).
    SetTechDebtTarget { target: f64 },

    // ── Roster ─────────────────────────────────────
    HireDeveloper,
    HireEmployee { spec: EmployeeSpec },
    FireEmployee { index: EmployeeIndex },

    // ── Strategy ───────────────────────────────────
    Pivot,
}
