//! Read-only KPI view of a state, for runners and UIs.
//!
//! Product-market fit stays hidden: it is never part of a snapshot.

use crate::{
    config::SimConfig,
    development_subsystem::{development_allocation, DevelopmentAllocation},
    market_subsystem::{churn_rate, organic_new_users},
    productivity::raw_output,
    state::GameState,
    types::Month,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub month: Month,
    pub cash: f64,
    pub bankrupt: bool,
    pub total_users: u64,
    pub mrr: f64,
    pub product_price: f64,
    pub sales_spend: f64,
    pub product_maturity: f64,
    pub launched: bool,
    pub market_ready_month: Option<Month>,
    pub technical_debt: f64,
    pub technical_debt_target: f64,
    pub reputation: f64,
    pub headcount: usize,
    pub payroll: f64,
    /// What the team would produce if a tick ran now.
    pub current_output: f64,
    pub allocation: DevelopmentAllocation,
    pub churn_rate: f64,
    pub organic_users: u64,
}

impl SimSnapshot {
    pub fn capture(state: &GameState, config: &SimConfig) -> Self {
        let current_output = raw_output(state, config);
        Self {
            month: state.month_number,
            cash: state.cash,
            bankrupt: state.bankrupt,
            total_users: state.total_users(),
            mrr: state.mrr(),
            product_price: state.product_price,
            sales_spend: state.sales_spend,
            product_maturity: state.product_maturity,
            launched: state.is_launched(),
            market_ready_month: state.market_ready_month,
            technical_debt: state.technical_debt,
            technical_debt_target: state.technical_debt_target,
            reputation: state.reputation,
            headcount: state.headcount(),
            payroll: state.payroll(),
            current_output,
            allocation: development_allocation(state, config, current_output),
            churn_rate: churn_rate(state, &config.market),
            organic_users: organic_new_users(state, config),
        }
    }
}
