//! The single mutable aggregate every operation reads and writes.
//!
//! OWNERSHIP: a `GameState` is created once and then mutated in place,
//! by `SimEngine::tick`, `SimEngine::pivot`, the hiring helpers below,
//! and direct writes to the caller knobs (`sales_spend`, `product_price`,
//! `technical_debt_target`). Exactly one writer at a time: holding
//! `&mut GameState` for the duration of a tick is the critical section.

use crate::{
    cohort::UserCohorts,
    config::SimConfig,
    error::{SimError, SimResult},
    rng::RandomSource,
    types::{EmployeeIndex, Month},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub salary: f64,
    pub base_productivity: f64,
    /// Kept within the configured drift bounds, [0.2, 1.5] by default.
    pub motivation: f64,
    pub months_employed: u64,
}

/// What a caller supplies to hire someone. Tenure always starts at 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSpec {
    pub salary: f64,
    pub base_productivity: f64,
    pub motivation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub month_number: Month,
    pub cash: f64,

    // Caller knobs, read-only to the engine.
    pub sales_spend: f64,
    pub product_price: f64,
    pub customer_acquisition_cost: f64,
    pub technical_debt_target: f64,

    pub product_maturity: f64,
    pub launch_maturity: f64,
    pub market_ready_month: Option<Month>,

    pub product_market_fit: f64,
    pub pmf_peak_value: f64,
    pub pmf_lifecycle_months: u64,

    pub technical_debt: f64,
    pub reputation: f64,
    pub user_cohorts: UserCohorts,
    pub employees: Vec<Employee>,
    pub bankrupt: bool,
}

impl GameState {
    /// Build a fresh state.
    ///
    /// Draws, in order: initial PMF, launch maturity, PMF lifecycle months.
    pub fn new(config: &SimConfig, rng: &mut dyn RandomSource) -> Self {
        let init = &config.initial;
        let pmf = &config.pmf;

        let product_market_fit = rng.uniform(pmf.initial_min, pmf.initial_max);
        let launch_maturity =
            init.launch_maturity_min + rng.next_f64() * init.launch_maturity_span;
        let pmf_lifecycle_months =
            pmf.lifecycle_base_months + rng.next_below(pmf.lifecycle_span_months);

        let mut state = Self {
            month_number: 0,
            cash: init.starting_cash,
            sales_spend: init.sales_spend,
            product_price: init.product_price,
            customer_acquisition_cost: init.customer_acquisition_cost,
            technical_debt_target: init.technical_debt_target,
            product_maturity: 0.0,
            launch_maturity,
            market_ready_month: None,
            product_market_fit,
            pmf_peak_value: product_market_fit,
            pmf_lifecycle_months,
            technical_debt: 0.0,
            reputation: init.reputation,
            user_cohorts: UserCohorts::new(),
            employees: Vec::new(),
            bankrupt: false,
        };
        if let Some(founder) = &init.founder {
            state.add_employee(founder.clone());
        }

        log::debug!(
            "new state: pmf={:.3} launch_maturity={:.4} lifecycle={}",
            state.product_market_fit,
            state.launch_maturity,
            state.pmf_lifecycle_months
        );
        state
    }

    // ── Queries ────────────────────────────────────────────────────

    pub fn total_users(&self) -> u64 {
        self.user_cohorts.total_users()
    }

    pub fn mrr(&self) -> f64 {
        self.user_cohorts.mrr()
    }

    pub fn payroll(&self) -> f64 {
        self.employees.iter().map(|e| e.salary).sum()
    }

    pub fn headcount(&self) -> usize {
        self.employees.len()
    }

    /// Pre-launch while maturity is below the launch threshold.
    pub fn is_launched(&self) -> bool {
        self.product_maturity >= self.launch_maturity
    }

    /// Launched and past the warm-up delay, if one is set.
    pub fn is_market_open(&self) -> bool {
        self.is_launched()
            && self
                .market_ready_month
                .map_or(true, |ready| self.month_number >= ready)
    }

    // ── Roster ─────────────────────────────────────────────────────

    pub fn add_employee(&mut self, spec: EmployeeSpec) {
        self.employees.push(Employee {
            salary: spec.salary,
            base_productivity: spec.base_productivity,
            motivation: spec.motivation,
            months_employed: 0,
        });
    }

    /// Hire a developer with salary then base productivity drawn from
    /// the configured hiring ranges.
    pub fn add_random_developer(
        &mut self,
        config: &SimConfig,
        rng: &mut dyn RandomSource,
    ) -> EmployeeSpec {
        let hiring = &config.hiring;
        let spec = EmployeeSpec {
            salary: rng.uniform(hiring.salary_min, hiring.salary_max).round(),
            base_productivity: rng.uniform(hiring.productivity_min, hiring.productivity_max),
            motivation: 1.0,
        };
        self.add_employee(spec.clone());
        log::info!(
            "month={} hired developer: salary={:.0} productivity={:.2}",
            self.month_number,
            spec.salary,
            spec.base_productivity
        );
        spec
    }

    pub fn remove_employee(&mut self, index: EmployeeIndex) -> SimResult<Employee> {
        if index >= self.employees.len() {
            return Err(SimError::EmployeeNotFound { index });
        }
        let removed = self.employees.remove(index);
        log::info!("month={} employee {index} left", self.month_number);
        Ok(removed)
    }

    // ── Invariants ─────────────────────────────────────────────────

    /// Check the ranges every tick must preserve.
    pub fn check_invariants(&self, config: &SimConfig) -> SimResult<()> {
        let fail = |detail: String| SimError::InvariantViolation {
            month: self.month_number,
            detail,
        };

        if !(0.0..=config.development.max_technical_debt).contains(&self.technical_debt) {
            return Err(fail(format!("technical_debt={}", self.technical_debt)));
        }
        if !(0.0..=1.0).contains(&self.reputation) {
            return Err(fail(format!("reputation={}", self.reputation)));
        }
        if !(config.pmf.floor..=config.pmf.ceiling).contains(&self.product_market_fit) {
            return Err(fail(format!("product_market_fit={}", self.product_market_fit)));
        }
        let (lo, hi) = (config.drift.motivation_min, config.drift.motivation_max);
        if let Some((i, e)) = self
            .employees
            .iter()
            .enumerate()
            .find(|(_, e)| !(lo..=hi).contains(&e.motivation))
        {
            return Err(fail(format!("employee {i} motivation={}", e.motivation)));
        }
        if self.user_cohorts.iter().any(|c| c.count == 0) {
            return Err(fail("empty cohort left in book".into()));
        }
        if !self.cash.is_finite() || !self.product_maturity.is_finite() {
            return Err(fail(format!(
                "non-finite cash={} maturity={}",
                self.cash, self.product_maturity
            )));
        }
        Ok(())
    }
}
