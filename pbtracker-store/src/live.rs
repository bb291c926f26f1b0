//! Live dashboard feed
//!
//! Joins the two collection subscriptions for one user and recomputes the
//! full dashboard state on every change notification. There is no
//! incremental update and no debouncing: rapid successive writes each
//! trigger a full recompute, which is fine at personal record counts.

use tokio::select;

use pbtracker_core::budget::{evaluate, BudgetStatus};
use pbtracker_core::model::{Budget, Transaction};
use pbtracker_core::prompt::{FinancialContext, MAX_RECENT};
use pbtracker_core::summary::{recent, summarize, FinancialSummary};

use crate::store::{MemoryStore, Subscription};
use crate::StoreError;

/// Everything a dashboard screen renders from
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub summary: FinancialSummary,
    pub budgets: Vec<BudgetStatus>,
    pub recent: Vec<Transaction>,
}

/// Scoped pair of subscriptions for one user's dashboard. Dropping the feed
/// releases both, so an abandoned screen cannot leak updates.
pub struct DashboardFeed {
    transactions: Subscription<Vec<Transaction>>,
    budgets: Subscription<Vec<Budget>>,
}

impl DashboardFeed {
    pub fn attach(store: &MemoryStore, uid: &str) -> Self {
        Self {
            transactions: store.subscribe_transactions(uid),
            budgets: store.subscribe_budgets(uid),
        }
    }

    fn compute(transactions: &[Transaction], budgets: &[Budget]) -> DashboardSnapshot {
        let summary = summarize(transactions);
        DashboardSnapshot {
            budgets: evaluate(budgets, transactions),
            recent: recent(transactions, MAX_RECENT),
            summary,
        }
    }

    /// Recompute from the latest snapshots without waiting
    pub fn snapshot(&self) -> DashboardSnapshot {
        Self::compute(&self.transactions.current(), &self.budgets.current())
    }

    /// Wait until either collection changes, then recompute.
    pub async fn changed(&mut self) -> Result<DashboardSnapshot, StoreError> {
        select! {
            txns = self.transactions.changed() => {
                txns?;
            }
            budgets = self.budgets.changed() => {
                budgets?;
            }
        }
        Ok(self.snapshot())
    }

    /// The chat payload for the current state, bounded for the relay.
    pub fn financial_context(&self) -> FinancialContext {
        let transactions = self.transactions.current();
        FinancialContext {
            summary: summarize(&transactions),
            budgets: self.budgets.current(),
            recent_activity: recent(&transactions, MAX_RECENT),
        }
    }
}
