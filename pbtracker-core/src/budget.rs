//! Budget consumption evaluation
//!
//! Spent amounts are all-time expense totals for the budget's category, not
//! filtered to the current month. Dashboard and chat context both read the
//! same numbers; callers wanting a month view filter the transaction list
//! before evaluating.

use serde::{Deserialize, Serialize};

use crate::model::{Budget, Transaction};
use crate::summary::FinancialSummary;

/// percent_used above this is a warning
pub const WARNING_PCT: f64 = 70.0;
/// percent_used above this is danger
pub const DANGER_PCT: f64 = 90.0;

/// Consumption classification by fixed thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Safe,
    Warning,
    Danger,
}

impl Tier {
    pub fn for_percent(percent_used: f64) -> Self {
        if percent_used > DANGER_PCT {
            Tier::Danger
        } else if percent_used > WARNING_PCT {
            Tier::Warning
        } else {
            Tier::Safe
        }
    }
}

/// One budget joined with the spending recorded against its category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub category: String,
    /// The configured ceiling
    pub budget: f64,
    pub spent: f64,
    /// budget - spent, unclamped; negative when overspent
    pub remaining: f64,
    /// Clamped into [0, 100] for display
    pub percent_used: f64,
    pub tier: Tier,
}

fn status(budget: &Budget, spent: f64) -> BudgetStatus {
    // A non-positive ceiling would divide to a non-finite percentage; the
    // store rejects those at creation, and this reports 0% as a second line.
    let percent_used = if budget.amount > 0.0 {
        (spent / budget.amount * 100.0).min(100.0)
    } else {
        0.0
    };
    BudgetStatus {
        category: budget.category.clone(),
        budget: budget.amount,
        spent,
        remaining: budget.amount - spent,
        percent_used,
        tier: Tier::for_percent(percent_used),
    }
}

/// Join every budget with the expense transactions in its category.
pub fn evaluate(budgets: &[Budget], transactions: &[Transaction]) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|b| {
            let spent = transactions
                .iter()
                .filter(|t| t.is_expense() && t.category == b.category)
                .map(|t| t.amount)
                .sum();
            status(b, spent)
        })
        .collect()
}

/// Same join for callers that hold a computed summary instead of the raw
/// transaction list (the relay receives only the summary on the wire).
pub fn evaluate_from_summary(budgets: &[Budget], summary: &FinancialSummary) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|b| status(b, summary.category_total(&b.category)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TxnKind;
    use crate::summary::summarize;
    use chrono::{TimeZone, Utc};

    fn expense(amount: f64, category: &str) -> Transaction {
        Transaction {
            id: format!("txn-{category}-{amount}"),
            kind: TxnKind::Expense,
            amount,
            category: category.to_string(),
            description: String::new(),
            date: Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap(),
        }
    }

    fn budget(category: &str, amount: f64) -> Budget {
        Budget {
            id: format!("bud-{category}"),
            category: category.to_string(),
            amount,
        }
    }

    #[test]
    fn test_percent_used_is_clamped_but_remaining_is_not() {
        let statuses = evaluate(&[budget("Food", 100.0)], &[expense(150.0, "Food")]);
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].percent_used, 100.0);
        assert_eq!(statuses[0].remaining, -50.0);
        assert_eq!(statuses[0].tier, Tier::Danger);
    }

    #[test]
    fn test_tier_thresholds_are_exclusive() {
        assert_eq!(Tier::for_percent(70.0), Tier::Safe);
        assert_eq!(Tier::for_percent(70.1), Tier::Warning);
        assert_eq!(Tier::for_percent(90.0), Tier::Warning);
        assert_eq!(Tier::for_percent(90.1), Tier::Danger);
        assert_eq!(Tier::for_percent(0.0), Tier::Safe);
    }

    #[test]
    fn test_zero_amount_budget_reports_zero_percent() {
        let statuses = evaluate(&[budget("Food", 0.0)], &[expense(40.0, "Food")]);
        assert_eq!(statuses[0].percent_used, 0.0);
        assert!(statuses[0].percent_used.is_finite());
        assert_eq!(statuses[0].tier, Tier::Safe);
    }

    #[test]
    fn test_only_matching_expenses_count() {
        let txns = vec![
            expense(30.0, "Food"),
            expense(99.0, "Transport"),
            Transaction {
                kind: TxnKind::Income,
                ..expense(500.0, "Food")
            },
        ];
        let statuses = evaluate(&[budget("Food", 100.0)], &txns);
        assert_eq!(statuses[0].spent, 30.0);
        assert_eq!(statuses[0].tier, Tier::Safe);
    }

    #[test]
    fn test_summary_and_transaction_paths_agree() {
        let txns = vec![expense(200.0, "Food"), expense(100.0, "Food")];
        let budgets = vec![budget("Food", 250.0)];
        let from_txns = evaluate(&budgets, &txns);
        let from_summary = evaluate_from_summary(&budgets, &summarize(&txns));
        assert_eq!(from_txns, from_summary);
        assert_eq!(from_txns[0].spent, 300.0);
        assert_eq!(from_txns[0].percent_used, 100.0);
        assert_eq!(from_txns[0].remaining, -50.0);
        assert_eq!(from_txns[0].tier, Tier::Danger);
    }
}
