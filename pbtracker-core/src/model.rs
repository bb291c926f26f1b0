//! Domain record types shared by the store adapter and the chat relay

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TxnKind {
    Income,
    Expense,
}

/// One financial event. Immutable once created; deletion is the only edit path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Identifier assigned by the store
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TxnKind,
    /// Always positive; the sign is carried by `kind`
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TxnKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TxnKind::Expense
    }
}

/// A per-category monthly ceiling. At most one budget per category per user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: String,
    pub category: String,
    pub amount: f64,
}

/// Expense categories offered by the entry form
pub const EXPENSE_CATEGORIES: [&str; 7] = [
    "Food",
    "Transport",
    "Utilities",
    "Entertainment",
    "Shopping",
    "Health",
    "Other",
];

/// Income categories offered by the entry form
pub const INCOME_CATEGORIES: [&str; 5] = ["Salary", "Freelance", "Investments", "Gifts", "Other"];

/// The fixed category list for a transaction kind
pub fn categories_for(kind: TxnKind) -> &'static [&'static str] {
    match kind {
        TxnKind::Income => &INCOME_CATEGORIES,
        TxnKind::Expense => &EXPENSE_CATEGORIES,
    }
}

/// Who authored a chat message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// A single turn in the assistant conversation. Session-only, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ChatMessage {
    pub fn user(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            is_error: false,
        }
    }

    pub fn assistant(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Assistant,
            timestamp: Utc::now(),
            is_error: false,
        }
    }

    /// An assistant-side placeholder shown when the relay call failed
    pub fn assistant_error(id: u64, text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::assistant(id, text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_transaction_wire_format() {
        let txn = Transaction {
            id: "txn-1".to_string(),
            kind: TxnKind::Expense,
            amount: 42.5,
            category: "Food".to_string(),
            description: "groceries".to_string(),
            date: Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["amount"], 42.5);
        assert_eq!(json["category"], "Food");

        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn test_categories_per_kind() {
        assert!(categories_for(TxnKind::Expense).contains(&"Food"));
        assert!(categories_for(TxnKind::Income).contains(&"Salary"));
        assert!(!categories_for(TxnKind::Income).contains(&"Food"));
    }

    #[test]
    fn test_chat_message_error_flag() {
        let ok = ChatMessage::assistant(1, "hello");
        assert!(!ok.is_error);
        let json = serde_json::to_value(&ok).unwrap();
        assert!(json.get("is_error").is_none());

        let failed = ChatMessage::assistant_error(2, "try again");
        assert!(failed.is_error);
        assert_eq!(failed.sender, Sender::Assistant);
    }
}
