//! Aggregation of the raw transaction list into dashboard totals
//!
//! Everything here is a pure function over an in-memory slice. The summary is
//! rebuilt from scratch on every store notification; there is no incremental
//! update path to keep consistent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Transaction;

/// One label/amount pair in an order-preserving breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreakdownEntry {
    pub label: String,
    pub amount: f64,
}

/// Derived totals over the full transaction list. Never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expense: f64,
    /// total_income - total_expense; may be negative
    pub balance: f64,
    /// Expense total per category, in first-encountered order
    pub category_breakdown: Vec<BreakdownEntry>,
    /// Expense total per "Month Year" label, in first-encountered order
    pub monthly_spending: Vec<BreakdownEntry>,
}

impl FinancialSummary {
    /// Expense total recorded for a category, 0 when the category never appears
    pub fn category_total(&self, category: &str) -> f64 {
        self.category_breakdown
            .iter()
            .find(|e| e.label == category)
            .map(|e| e.amount)
            .unwrap_or(0.0)
    }
}

/// Calendar month label used for the monthly breakdown, e.g. "March 2026"
pub fn month_label(date: &DateTime<Utc>) -> String {
    date.format("%B %Y").to_string()
}

fn bump(entries: &mut Vec<BreakdownEntry>, label: &str, amount: f64) {
    match entries.iter_mut().find(|e| e.label == label) {
        Some(entry) => entry.amount += amount,
        None => entries.push(BreakdownEntry {
            label: label.to_string(),
            amount,
        }),
    }
}

/// Reduce the transaction list to a [`FinancialSummary`].
///
/// Only expense transactions contribute to the category and monthly
/// breakdowns. Empty input yields the all-zero summary. Assumes amounts were
/// validated at the store boundary; nothing here can fail.
pub fn summarize(transactions: &[Transaction]) -> FinancialSummary {
    let mut summary = FinancialSummary::default();

    for txn in transactions {
        if txn.is_income() {
            summary.total_income += txn.amount;
        } else {
            summary.total_expense += txn.amount;
            bump(&mut summary.category_breakdown, &txn.category, txn.amount);
            bump(
                &mut summary.monthly_spending,
                &month_label(&txn.date),
                txn.amount,
            );
        }
    }

    summary.balance = summary.total_income - summary.total_expense;
    summary
}

/// The `n` most recent transactions, newest first. Equal dates keep the
/// input order (stable sort).
pub fn recent(transactions: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}
