//! Cohort book — users grouped by the price they signed up at.
//!
//! A cohort locks in its signup price: later price changes never touch
//! existing revenue. Cohorts with the same price are merged on insert and
//! pruned once empty, so the book never holds a zero-count cohort.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCohort {
    pub count: u64,
    pub signup_price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserCohorts {
    cohorts: Vec<UserCohort>,
}

impl UserCohorts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserCohort> {
        self.cohorts.iter()
    }

    pub fn len(&self) -> usize {
        self.cohorts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cohorts.is_empty()
    }

    /// Saturates at `u64::MAX`.
    pub fn total_users(&self) -> u64 {
        self.cohorts
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.count))
    }

    /// Monthly recurring revenue at each cohort's locked-in price.
    pub fn mrr(&self) -> f64 {
        self.cohorts
            .iter()
            .map(|c| c.count as f64 * c.signup_price)
            .sum()
    }

    /// Add `count` users at `price`, merging into an existing cohort
    /// with the same price.
    pub fn add(&mut self, count: u64, price: f64) {
        if count == 0 {
            return;
        }
        match self.cohorts.iter_mut().find(|c| c.signup_price == price) {
            Some(cohort) => cohort.count = cohort.count.saturating_add(count),
            None => self.cohorts.push(UserCohort { count, signup_price: price }),
        }
    }

    /// Remove `target` users spread across cohorts in proportion to size.
    ///
    /// Pass 1 floors each cohort's proportional share. Pass 2 sweeps the
    /// rounding loss greedily through the cohorts in book order. Returns
    /// the number actually removed, which is `min(target, total)`.
    pub fn remove_proportional(&mut self, target: u64) -> u64 {
        // Exact total; the saturating `total_users` could overstate shares.
        let total: u128 = self.cohorts.iter().map(|c| c.count as u128).sum();
        if target == 0 || total == 0 {
            return 0;
        }
        let target = (target as u128).min(total) as u64;

        let mut removals: Vec<u64> = self
            .cohorts
            .iter()
            .map(|c| ((target as u128 * c.count as u128) / total) as u64)
            .collect();

        let mut remaining = target.saturating_sub(removals.iter().sum());
        for (cohort, removed) in self.cohorts.iter().zip(removals.iter_mut()) {
            if remaining == 0 {
                break;
            }
            let take = (cohort.count - *removed).min(remaining);
            *removed += take;
            remaining -= take;
        }

        let mut removed_total = 0;
        for (cohort, removed) in self.cohorts.iter_mut().zip(removals) {
            cohort.count -= removed;
            removed_total += removed;
        }
        self.cohorts.retain(|c| c.count > 0);
        removed_total
    }
}
