//! pbtracker-core: domain types and the summary/budget/prompt pipeline
//!
//! Pure logic only — no I/O lives in this crate. The store adapter feeds
//! validated records in; these functions turn them into dashboard totals,
//! budget statuses, and the bounded chat context block.

pub mod budget;
pub mod model;
pub mod prompt;
pub mod summary;

pub use budget::{evaluate, evaluate_from_summary, BudgetStatus, Tier};
pub use model::{
    categories_for, Budget, ChatMessage, Sender, Transaction, TxnKind, EXPENSE_CATEGORIES,
    INCOME_CATEGORIES,
};
pub use prompt::{build_context, system_prompt, FinancialContext, MAX_RECENT};
pub use summary::{month_label, recent, summarize, BreakdownEntry, FinancialSummary};
