//! Raw record shapes at the store boundary
//!
//! The hosted store hands back loosely-typed values and the entry forms
//! submit strings; everything is validated into the typed domain records
//! here. A malformed amount is rejected at the write, never allowed to
//! become NaN and corrupt every downstream sum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pbtracker_core::model::{categories_for, Budget, Transaction, TxnKind};

use crate::StoreError;

/// A transaction as submitted by the entry form, amounts still unparsed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDraft {
    /// "income" or "expense"
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    /// Defaults to now when the form omits it
    pub date: Option<DateTime<Utc>>,
}

impl TransactionDraft {
    pub fn expense(amount: &str, category: &str, description: &str) -> Self {
        Self {
            kind: "expense".to_string(),
            amount: amount.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            date: None,
        }
    }

    pub fn income(amount: &str, category: &str, description: &str) -> Self {
        Self {
            kind: "income".to_string(),
            ..Self::expense(amount, category, description)
        }
    }

    /// Validate into a typed [`Transaction`] under the store-assigned id.
    pub fn validate(self, id: String) -> Result<Transaction, StoreError> {
        let kind = match self.kind.as_str() {
            "income" => TxnKind::Income,
            "expense" => TxnKind::Expense,
            other => return Err(StoreError::InvalidKind(other.to_string())),
        };
        let amount = parse_amount(&self.amount)?;
        if !categories_for(kind).contains(&self.category.as_str()) {
            return Err(StoreError::UnknownCategory(self.category));
        }
        Ok(Transaction {
            id,
            kind,
            amount,
            category: self.category,
            description: self.description,
            date: self.date.unwrap_or_else(Utc::now),
        })
    }
}

/// A budget as submitted by the entry form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetDraft {
    pub category: String,
    pub amount: String,
}

impl BudgetDraft {
    pub fn new(category: &str, amount: &str) -> Self {
        Self {
            category: category.to_string(),
            amount: amount.to_string(),
        }
    }

    /// Validate the ceiling. Zero-amount budgets are rejected here so the
    /// evaluator can never be asked to divide by zero.
    pub fn validate(self, id: String) -> Result<Budget, StoreError> {
        let amount = parse_amount(&self.amount)?;
        if !categories_for(TxnKind::Expense).contains(&self.category.as_str()) {
            return Err(StoreError::UnknownCategory(self.category));
        }
        Ok(Budget {
            id,
            category: self.category,
            amount,
        })
    }
}

/// `users/{uid}/profile` value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,
    pub email: String,
}

fn parse_amount(raw: &str) -> Result<f64, StoreError> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|_| StoreError::InvalidAmount(raw.to_string()))?;
    // "NaN" and "inf" parse successfully; keep them out too
    if !amount.is_finite() || amount <= 0.0 {
        return Err(StoreError::InvalidAmount(raw.to_string()));
    }
    Ok(amount)
}
