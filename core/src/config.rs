//! Tuning knobs for every model, gathered in one immutable structure.
//!
//! The engine reads a `SimConfig` it was built with and never mutates it,
//! so several calibrations can run side by side. `SimConfig::default()`
//! is the canonical calibration; `SimConfig::load()` reads a JSON file
//! where any missing section falls back to its default.

use crate::{
    error::{SimError, SimResult},
    state::EmployeeSpec,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ── Productivity ───────────────────────────────────────────────────

/// Stepped onboarding ramp for new hires.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingConfig {
    /// Multiplier while `months_employed == 0`.
    pub first_month: f64,
    /// Multiplier while `months_employed == 1`.
    pub second_month: f64,
    /// Multiplier from the third month on.
    pub ramped: f64,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            first_month:  0.33,
            second_month: 0.66,
            ramped:       1.0,
        }
    }
}

// ── Development & technical debt ───────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DevelopmentConfig {
    /// Output lost per pairwise communication line.
    pub overhead_per_line: f64,
    /// Converts raw feature effort into product maturity. Calibrated so
    /// seven ramped developers reach 0.5–1.0 maturity in 60 months.
    pub productivity_divider: f64,
    /// Debt accrued per unit of feature effort on a fresh codebase.
    pub debt_growth_rate: f64,
    /// Extra debt growth per unit of maturity.
    pub debt_maturity_factor: f64,
    /// Clean-up fraction per unit of debt above target.
    pub cleanup_sensitivity: f64,
    pub max_cleanup_fraction: f64,
    /// Debt removed per unit of clean-up effort.
    pub debt_reduction_rate: f64,
    pub max_technical_debt: f64,
    /// Bounds the command layer enforces on the debt target knob.
    pub debt_target_min: f64,
    pub debt_target_max: f64,
}

impl Default for DevelopmentConfig {
    fn default() -> Self {
        Self {
            overhead_per_line:    0.01,
            productivity_divider: 333.0,
            debt_growth_rate:     0.01,
            debt_maturity_factor: 5.0,
            cleanup_sensitivity:  2.0,
            max_cleanup_fraction: 0.5,
            debt_reduction_rate:  0.1,
            max_technical_debt:   0.5,
            debt_target_min:      0.1,
            debt_target_max:      0.9,
        }
    }
}

// ── Product-market fit ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PmfConfig {
    pub floor: f64,
    pub ceiling: f64,
    /// Range the initial PMF is drawn from.
    pub initial_min: f64,
    pub initial_max: f64,
    /// Probability that a pivot lands above the current PMF.
    pub pivot_improve_probability: f64,
    /// Lifecycle length is `base + floor(r * span)` months.
    pub lifecycle_base_months: u64,
    pub lifecycle_span_months: u64,
    /// Fraction of users lost on a pivot.
    pub pivot_user_loss: f64,
    pub pivot_reputation_hit: f64,
}

impl Default for PmfConfig {
    fn default() -> Self {
        Self {
            floor:                     0.1,
            ceiling:                   1.0,
            initial_min:               0.1,
            initial_max:               0.5,
            pivot_improve_probability: 0.75,
            lifecycle_base_months:     60,
            lifecycle_span_months:     121,
            pivot_user_loss:           0.8,
            pivot_reputation_hit:      0.15,
        }
    }
}

// ── Market ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Organic signups per user per month at reputation 1.0.
    pub organic_rate: f64,
    pub churn_base: f64,
    pub churn_debt_weight: f64,
    pub churn_reputation_weight: f64,
    /// Market warm-up is `base + floor(r * span)` months.
    pub warmup_base_months: u64,
    pub warmup_span_months: u64,
    /// Price at which the acquisition-cost knob applies unscaled.
    pub reference_price: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            organic_rate:            0.01,
            churn_base:              0.03,
            churn_debt_weight:       0.06,
            churn_reputation_weight: 0.02,
            warmup_base_months:      2,
            warmup_span_months:      4,
            reference_price:         100.0,
        }
    }
}

// ── Drift ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Debt above which both motivation and reputation suffer.
    pub high_debt_threshold: f64,
    pub high_debt_motivation_penalty: f64,
    /// Headcount above which everyone loses motivation.
    pub large_team_threshold: usize,
    pub large_team_motivation_penalty: f64,
    pub long_tenure_months: u64,
    pub long_tenure_motivation_penalty: f64,
    pub motivation_min: f64,
    pub motivation_max: f64,
    pub mature_product_threshold: f64,
    pub mature_product_reputation_gain: f64,
    pub high_debt_reputation_penalty: f64,
    pub high_churn_threshold: f64,
    pub high_churn_reputation_penalty: f64,
    pub organic_growth_reputation_gain: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            high_debt_threshold:            0.3,
            high_debt_motivation_penalty:   0.02,
            large_team_threshold:           10,
            large_team_motivation_penalty:  0.01,
            long_tenure_months:             12,
            long_tenure_motivation_penalty: 0.01,
            motivation_min:                 0.2,
            motivation_max:                 1.5,
            mature_product_threshold:       0.5,
            mature_product_reputation_gain: 0.01,
            high_debt_reputation_penalty:   0.02,
            high_churn_threshold:           0.08,
            high_churn_reputation_penalty:  0.01,
            organic_growth_reputation_gain: 0.005,
        }
    }
}

// ── Initial state & hiring ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialStateConfig {
    pub starting_cash: f64,
    pub product_price: f64,
    pub customer_acquisition_cost: f64,
    pub sales_spend: f64,
    pub reputation: f64,
    pub technical_debt_target: f64,
    /// Launch maturity is drawn from `[min, min + span)`.
    pub launch_maturity_min: f64,
    pub launch_maturity_span: f64,
    /// Hired into every fresh state when present.
    pub founder: Option<EmployeeSpec>,
}

impl Default for InitialStateConfig {
    fn default() -> Self {
        Self {
            starting_cash:             100_000.0,
            product_price:             100.0,
            customer_acquisition_cost: 50.0,
            sales_spend:               0.0,
            reputation:                0.5,
            technical_debt_target:     0.1,
            launch_maturity_min:       0.01,
            launch_maturity_span:      0.0035,
            founder: Some(EmployeeSpec {
                salary:            3000.0,
                base_productivity: 1.0,
                motivation:        1.0,
            }),
        }
    }
}

/// Ranges a randomly hired developer is drawn from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HiringConfig {
    pub salary_min: f64,
    pub salary_max: f64,
    pub productivity_min: f64,
    pub productivity_max: f64,
}

impl Default for HiringConfig {
    fn default() -> Self {
        Self {
            salary_min:       3000.0,
            salary_max:       8000.0,
            productivity_min: 0.6,
            productivity_max: 1.2,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub onboarding:  OnboardingConfig,
    pub development: DevelopmentConfig,
    pub pmf:         PmfConfig,
    pub market:      MarketConfig,
    pub drift:       DriftConfig,
    pub initial:     InitialStateConfig,
    pub hiring:      HiringConfig,
}

impl SimConfig {
    /// Load and validate a JSON config file.
    /// In tests, use SimConfig::default().
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: SimConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::info!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Reject values no simulation could sensibly run with.
    pub fn validate(&self) -> SimResult<()> {
        let d = &self.development;
        let p = &self.pmf;
        let m = &self.market;
        let dr = &self.drift;
        let i = &self.initial;
        let h = &self.hiring;

        for (field, value) in [
            ("onboarding.first_month", self.onboarding.first_month),
            ("onboarding.second_month", self.onboarding.second_month),
            ("onboarding.ramped", self.onboarding.ramped),
            ("development.overhead_per_line", d.overhead_per_line),
            ("development.debt_growth_rate", d.debt_growth_rate),
            ("development.debt_maturity_factor", d.debt_maturity_factor),
            ("development.cleanup_sensitivity", d.cleanup_sensitivity),
            ("development.debt_reduction_rate", d.debt_reduction_rate),
            ("market.organic_rate", m.organic_rate),
            ("market.churn_base", m.churn_base),
            ("market.churn_debt_weight", m.churn_debt_weight),
            ("market.churn_reputation_weight", m.churn_reputation_weight),
            ("initial.customer_acquisition_cost", i.customer_acquisition_cost),
            ("initial.sales_spend", i.sales_spend),
            ("initial.product_price", i.product_price),
        ] {
            ensure(value.is_finite() && value >= 0.0, field, "must be finite and >= 0")?;
        }

        ensure(
            d.productivity_divider.is_finite() && d.productivity_divider > 0.0,
            "development.productivity_divider",
            "must be > 0",
        )?;
        ensure(
            (0.0..=1.0).contains(&d.max_cleanup_fraction),
            "development.max_cleanup_fraction",
            "must be within [0, 1]",
        )?;
        ensure(
            d.max_technical_debt > 0.0 && d.max_technical_debt < 1.0,
            "development.max_technical_debt",
            "must be within (0, 1)",
        )?;
        ensure(
            d.debt_target_min <= d.debt_target_max,
            "development.debt_target_min",
            "must not exceed debt_target_max",
        )?;

        ensure(
            p.floor > 0.0 && p.floor <= p.ceiling,
            "pmf.floor",
            "must be > 0 and <= ceiling",
        )?;
        ensure(
            p.floor <= p.initial_min && p.initial_min <= p.initial_max && p.initial_max <= p.ceiling,
            "pmf.initial_min",
            "initial range must sit within [floor, ceiling]",
        )?;
        ensure(
            (0.0..=1.0).contains(&p.pivot_improve_probability),
            "pmf.pivot_improve_probability",
            "must be a probability",
        )?;
        ensure(
            (0.0..=1.0).contains(&p.pivot_user_loss),
            "pmf.pivot_user_loss",
            "must be a fraction",
        )?;
        ensure(
            p.lifecycle_base_months > 0,
            "pmf.lifecycle_base_months",
            "must be > 0",
        )?;

        ensure(
            m.reference_price.is_finite() && m.reference_price > 0.0,
            "market.reference_price",
            "must be > 0",
        )?;

        ensure(
            0.0 <= dr.motivation_min && dr.motivation_min <= dr.motivation_max,
            "drift.motivation_min",
            "must be >= 0 and <= motivation_max",
        )?;

        ensure(
            i.starting_cash.is_finite(),
            "initial.starting_cash",
            "must be finite",
        )?;
        ensure(
            (0.0..=1.0).contains(&i.reputation),
            "initial.reputation",
            "must be within [0, 1]",
        )?;
        ensure(
            i.launch_maturity_min > 0.0 && i.launch_maturity_span >= 0.0,
            "initial.launch_maturity_min",
            "must be > 0 with a non-negative span",
        )?;

        ensure(
            h.salary_min >= 0.0 && h.salary_min <= h.salary_max,
            "hiring.salary_min",
            "must be >= 0 and <= salary_max",
        )?;
        ensure(
            h.productivity_min >= 0.0 && h.productivity_min <= h.productivity_max,
            "hiring.productivity_min",
            "must be >= 0 and <= productivity_max",
        )?;
        Ok(())
    }
}

fn ensure(ok: bool, field: &'static str, reason: &str) -> SimResult<()> {
    if ok {
        Ok(())
    } else {
        Err(SimError::InvalidConfig { field, reason: reason.to_string() })
    }
}
