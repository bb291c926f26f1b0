//! In-memory realtime record store
//!
//! Implements the contract the app consumes from the hosted database: CRUD
//! over per-user transactions and budgets, plus live full-snapshot change
//! notifications per collection. Subscriptions are watch channels; dropping
//! the handle is the teardown.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use pbtracker_core::model::{Budget, Transaction};

use crate::record::{BudgetDraft, Profile, TransactionDraft};
use crate::StoreError;

/// Live view of one collection for one user.
///
/// Holds the receiving half of the store's watch channel; dropping it
/// releases the subscription. `changed` is cancel-safe, so it can sit inside
/// a `select!` next to the other collection's subscription.
pub struct Subscription<T> {
    rx: watch::Receiver<T>,
}

impl<T: Clone> Subscription<T> {
    /// The latest snapshot without waiting
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Wait for the next change notification and return the new snapshot.
    pub async fn changed(&mut self) -> Result<T, StoreError> {
        self.rx
            .changed()
            .await
            .map_err(|_| StoreError::Disconnected)?;
        Ok(self.rx.borrow_and_update().clone())
    }
}

struct UserData {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    profile: Option<Profile>,
    next_id: u64,
    txn_tx: watch::Sender<Vec<Transaction>>,
    budget_tx: watch::Sender<Vec<Budget>>,
}

impl UserData {
    fn new() -> Self {
        let (txn_tx, _) = watch::channel(Vec::new());
        let (budget_tx, _) = watch::channel(Vec::new());
        Self {
            transactions: Vec::new(),
            budgets: Vec::new(),
            profile: None,
            next_id: 1,
            txn_tx,
            budget_tx,
        }
    }

    fn assign_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{}", self.next_id);
        self.next_id += 1;
        id
    }
}

/// Per-user record store with push notifications. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<Mutex<HashMap<String, UserData>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_user<R>(&self, uid: &str, f: impl FnOnce(&mut UserData) -> R) -> R {
        let mut users = self.users.lock().expect("store mutex poisoned");
        let user = users.entry(uid.to_string()).or_insert_with(UserData::new);
        f(user)
    }

    /// Validate and append a transaction, then notify subscribers.
    pub fn add_transaction(
        &self,
        uid: &str,
        draft: TransactionDraft,
    ) -> Result<Transaction, StoreError> {
        self.with_user(uid, |user| {
            let id = user.assign_id("txn");
            let txn = draft.validate(id)?;
            user.transactions.push(txn.clone());
            user.txn_tx.send_replace(user.transactions.clone());
            Ok(txn)
        })
    }

    pub fn delete_transaction(&self, uid: &str, id: &str) -> Result<(), StoreError> {
        self.with_user(uid, |user| {
            let before = user.transactions.len();
            user.transactions.retain(|t| t.id != id);
            if user.transactions.len() == before {
                return Err(StoreError::UnknownRecord(id.to_string()));
            }
            user.txn_tx.send_replace(user.transactions.clone());
            Ok(())
        })
    }

    pub fn list_transactions(&self, uid: &str) -> Vec<Transaction> {
        self.with_user(uid, |user| user.transactions.clone())
    }

    /// Create or update the budget for the draft's category.
    ///
    /// Lookup-before-insert: when a budget for the category already exists
    /// its amount is replaced in place under the same id, keeping the
    /// one-budget-per-category invariant.
    pub fn upsert_budget(&self, uid: &str, draft: BudgetDraft) -> Result<Budget, StoreError> {
        self.with_user(uid, |user| {
            let id = match user.budgets.iter().find(|b| b.category == draft.category) {
                Some(existing) => existing.id.clone(),
                None => user.assign_id("bud"),
            };
            let budget = draft.validate(id)?;
            match user.budgets.iter_mut().find(|b| b.id == budget.id) {
                Some(slot) => *slot = budget.clone(),
                None => user.budgets.push(budget.clone()),
            }
            user.budget_tx.send_replace(user.budgets.clone());
            Ok(budget)
        })
    }

    pub fn delete_budget(&self, uid: &str, id: &str) -> Result<(), StoreError> {
        self.with_user(uid, |user| {
            let before = user.budgets.len();
            user.budgets.retain(|b| b.id != id);
            if user.budgets.len() == before {
                return Err(StoreError::UnknownRecord(id.to_string()));
            }
            user.budget_tx.send_replace(user.budgets.clone());
            Ok(())
        })
    }

    pub fn list_budgets(&self, uid: &str) -> Vec<Budget> {
        self.with_user(uid, |user| user.budgets.clone())
    }

    pub fn get_profile(&self, uid: &str) -> Option<Profile> {
        self.with_user(uid, |user| user.profile.clone())
    }

    pub fn set_profile(&self, uid: &str, profile: Profile) {
        self.with_user(uid, |user| user.profile = Some(profile));
    }

    /// Subscribe to the user's transaction list. The first snapshot is
    /// available immediately via [`Subscription::current`].
    pub fn subscribe_transactions(&self, uid: &str) -> Subscription<Vec<Transaction>> {
        self.with_user(uid, |user| Subscription {
            rx: user.txn_tx.subscribe(),
        })
    }

    /// Subscribe to the user's budget list.
    pub fn subscribe_budgets(&self, uid: &str) -> Subscription<Vec<Budget>> {
        self.with_user(uid, |user| Subscription {
            rx: user.budget_tx.subscribe(),
        })
    }
}
