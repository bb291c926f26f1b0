//! pbtracker-store: record store boundary for the budget tracker
//!
//! The hosted database is modeled here at its contract: typed records in and
//! out, per-user scoping, and live change subscriptions with scoped
//! teardown. Malformed records are rejected at this boundary so the pure
//! aggregation code never sees them.

pub mod live;
pub mod record;
pub mod store;

use thiserror::Error;

pub use live::{DashboardFeed, DashboardSnapshot};
pub use record::{BudgetDraft, Profile, TransactionDraft};
pub use store::{MemoryStore, Subscription};

/// Failures at the store boundary. Surfaced to the user as dismissible
/// messages; they never crash the consuming screen.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid transaction type: {0:?}")]
    InvalidKind(String),
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
    #[error("no such record: {0}")]
    UnknownRecord(String),
    #[error("store connection lost")]
    Disconnected,
}
