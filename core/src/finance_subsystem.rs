//! Finance phase — income, expenses, bankruptcy.
//!
//! Income is cohort-locked MRR, not the current price. Sales spend is
//! only debited once the product has launched; before that the budget
//! sits unspent.
//!
//! Execution: every tick, after market.

use crate::{
    config::SimConfig,
    error::SimResult,
    event::SimEvent,
    rng::RandomSource,
    state::GameState,
    subsystem::SimSubsystem,
};

pub fn monthly_income(state: &GameState) -> f64 {
    state.mrr()
}

pub fn monthly_expense(state: &GameState) -> f64 {
    let sales = if state.is_launched() {
        state.sales_spend.max(0.0)
    } else {
        0.0
    };
    state.payroll() + sales
}

pub struct FinanceSubsystem;

impl FinanceSubsystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FinanceSubsystem {
    fn default() -> Self { Self::new() }
}

impl SimSubsystem for FinanceSubsystem {
    fn name(&self) -> &'static str { "finance" }

    fn update(
        &mut self,
        state: &mut GameState,
        _config: &SimConfig,
        _events_in: &[SimEvent],
        _rng: &mut dyn RandomSource,
    ) -> SimResult<Vec<SimEvent>> {
        let month = state.month_number;
        let income = monthly_income(state);
        let expense = monthly_expense(state);
        state.cash += income - expense;

        let mut out = vec![SimEvent::FinancesSettled {
            month,
            income,
            expense,
            cash: state.cash,
        }];

        // Bankruptcy is terminal: set once, never cleared.
        if state.cash <= 0.0 && !state.bankrupt {
            state.bankrupt = true;
            log::info!("month={month} finance: bankrupt with cash {:.0}", state.cash);
            out.push(SimEvent::BankruptcyDeclared { month, cash: state.cash });
        } else {
            log::debug!(
                "month={month} finance: income={income:.0} expense={expense:.0} cash={:.0}",
                state.cash
            );
        }

        Ok(out)
    }
}
