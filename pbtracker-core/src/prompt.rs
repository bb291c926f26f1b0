//! Assembly of the natural-language financial context sent to the assistant
//!
//! The rendered block is deterministic and section-ordered so prompts stay
//! stable across requests; only the numbers change. Callers bound the recent
//! slice to [`MAX_RECENT`] and keep category cardinality small upstream — the
//! assembler renders every category it is given.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Write;

use crate::budget::evaluate_from_summary;
use crate::model::{Budget, Transaction};
use crate::summary::FinancialSummary;

/// Upper bound on transactions rendered in the Recent Transactions section
pub const MAX_RECENT: usize = 5;

/// Literal line emitted when the user has no budgets
pub const NO_BUDGETS_LINE: &str = "- No budgets set";

/// The wire payload a client attaches to every chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialContext {
    pub summary: FinancialSummary,
    pub budgets: Vec<Budget>,
    /// At most [`MAX_RECENT`] transactions, newest first
    pub recent_activity: Vec<Transaction>,
}

const PERSONA: &str = "You are a helpful AI financial assistant for a personal budget tracking application called PBTracker. You have access to the user's financial data and should provide personalized advice and insights.

Guidelines:
- Be conversational, helpful, and encouraging
- Provide specific, actionable advice based on their actual financial data
- Use exact numbers from their data when relevant
- Focus on practical budgeting and financial wellness tips
- If they ask about categories they haven't spent in, acknowledge this
- Be supportive and non-judgmental about their financial situation
- Keep responses concise but informative (aim for 2-4 sentences unless more detail is specifically requested)
- Use emojis sparingly and only when they add value";

/// The full system prompt: fixed persona plus the per-request context block
pub fn system_prompt(context: &str) -> String {
    format!("{PERSONA}\n\nCurrent Financial Data:\n{context}")
}

/// Render the bounded context block in fixed section order.
pub fn build_context(
    summary: &FinancialSummary,
    budgets: &[Budget],
    recent: &[Transaction],
) -> String {
    let mut out = String::new();

    out.push_str("Financial Summary:\n");
    let _ = writeln!(out, "- Total Income: ${:.2}", summary.total_income);
    let _ = writeln!(out, "- Total Expenses: ${:.2}", summary.total_expense);
    let _ = writeln!(out, "- Current Balance: ${:.2}", summary.balance);

    out.push_str("\nBudget Information:\n");
    if budgets.is_empty() {
        out.push_str(NO_BUDGETS_LINE);
        out.push('\n');
    } else {
        for s in evaluate_from_summary(budgets, summary) {
            let _ = writeln!(
                out,
                "- {}: ${:.2} spent of ${:.2} budget ({:.1}% used, ${:.2} remaining)",
                s.category, s.spent, s.budget, s.percent_used, s.remaining
            );
        }
    }

    out.push_str("\nCategory Spending Breakdown:\n");
    // descending by amount; stable sort keeps first-encountered order on ties
    let mut categories: Vec<_> = summary.category_breakdown.iter().collect();
    categories.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
    for entry in categories {
        let _ = writeln!(out, "- {}: ${:.2}", entry.label, entry.amount);
    }

    out.push_str("\nMonthly Spending:\n");
    // breakdown order as computed, deliberately not re-sorted
    for entry in &summary.monthly_spending {
        let _ = writeln!(out, "- {}: ${:.2}", entry.label, entry.amount);
    }

    out.push_str("\nRecent Transactions (Last 5):\n");
    for txn in recent.iter().take(MAX_RECENT) {
        let sign = if txn.is_income() { '+' } else { '-' };
        let _ = writeln!(
            out,
            "- {}: {}${:.2} - {} ({})",
            txn.date.format("%Y-%m-%d"),
            sign,
            txn.amount,
            txn.category,
            txn.description
        );
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TxnKind;
    use crate::summary::{recent, summarize, BreakdownEntry};
    use chrono::{TimeZone, Utc};

    fn txn(id: &str, kind: TxnKind, amount: f64, category: &str, day: u32) -> Transaction {
        Transaction {
            id: id.to_string(),
            kind,
            amount,
            category: category.to_string(),
            description: format!("{id} note"),
            date: Utc.with_ymd_and_hms(2026, 3, day, 8, 0, 0).unwrap(),
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
    fn test_no_budgets_renders_literal_line() {
        let context = build_context(&FinancialSummary::default(), &[], &[]);
        assert!(context.contains("No budgets set"));
    }

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let txns = vec![
            txn("t1", TxnKind::Income, 1000.0, "Salary", 1),
            txn("t2", TxnKind::Expense, 200.0, "Food", 2),
        ];
        let summary = summarize(&txns);
        let context = build_context(&summary, &[budget("Food", 250.0)], &recent(&txns, MAX_RECENT));

        let order = [
            "Financial Summary:",
            "Budget Information:",
            "Category Spending Breakdown:",
            "Monthly Spending:",
            "Recent Transactions (Last 5):",
        ];
        let positions: Vec<usize> = order.iter().map(|s| context.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{context}");
    }

    #[test]
    fn test_summary_lines_use_two_decimals() {
        let txns = vec![
            txn("t1", TxnKind::Income, 1000.0, "Salary", 1),
            txn("t2", TxnKind::Expense, 300.0, "Food", 2),
        ];
        let context = build_context(&summarize(&txns), &[], &[]);
        assert!(context.contains("- Total Income: $1000.00"));
        assert!(context.contains("- Total Expenses: $300.00"));
        assert!(context.contains("- Current Balance: $700.00"));
    }

    #[test]
    fn test_budget_line_shows_clamped_percent_and_signed_remaining() {
        let txns = vec![
            txn("t1", TxnKind::Expense, 200.0, "Food", 2),
            txn("t2", TxnKind::Expense, 100.0, "Food", 3),
        ];
        let context = build_context(&summarize(&txns), &[budget("Food", 250.0)], &[]);
        assert!(
            context.contains("- Food: $300.00 spent of $250.00 budget (100.0% used, $-50.00 remaining)"),
            "{context}"
        );
    }

    #[test]
    fn test_only_five_most_recent_transactions_appear() {
        let txns: Vec<Transaction> = (1..=6)
            .map(|d| txn(&format!("t{d}"), TxnKind::Expense, d as f64, "Food", d as u32))
            .collect();
        let context = build_context(&summarize(&txns), &[], &recent(&txns, MAX_RECENT));

        // t1 (oldest) is squeezed out, t2..t6 remain
        assert!(!context.contains("t1 note"));
        for d in 2..=6 {
            assert!(context.contains(&format!("t{d} note")), "{context}");
        }
        assert!(context.contains("- 2026-03-06: -$6.00 - Food (t6 note)"));
    }

    #[test]
    fn test_category_section_is_descending_with_stable_ties() {
        let summary = FinancialSummary {
            category_breakdown: vec![
                BreakdownEntry { label: "Transport".to_string(), amount: 20.0 },
                BreakdownEntry { label: "Food".to_string(), amount: 80.0 },
                BreakdownEntry { label: "Health".to_string(), amount: 20.0 },
            ],
            ..FinancialSummary::default()
        };
        let context = build_context(&summary, &[], &[]);

        let food = context.find("- Food: $80.00").unwrap();
        let transport = context.find("- Transport: $20.00").unwrap();
        let health = context.find("- Health: $20.00").unwrap();
        assert!(food < transport);
        // tie: Transport was encountered before Health
        assert!(transport < health);
    }

    #[test]
    fn test_monthly_section_keeps_breakdown_order() {
        let summary = FinancialSummary {
            monthly_spending: vec![
                BreakdownEntry { label: "March 2026".to_string(), amount: 50.0 },
                BreakdownEntry { label: "January 2026".to_string(), amount: 10.0 },
            ],
            ..FinancialSummary::default()
        };
        let context = build_context(&summary, &[], &[]);
        let march = context.find("- March 2026").unwrap();
        let january = context.find("- January 2026").unwrap();
        assert!(march < january, "monthly section must not be re-sorted");
    }

    #[test]
    fn test_income_transactions_render_with_plus_sign() {
        let txns = vec![txn("t1", TxnKind::Income, 1000.0, "Salary", 1)];
        let context = build_context(&summarize(&txns), &[], &recent(&txns, MAX_RECENT));
        assert!(context.contains("+$1000.00 - Salary (t1 note)"));
    }

    #[test]
    fn test_system_prompt_embeds_context() {
        let prompt = system_prompt("Financial Summary:\n- Total Income: $0.00");
        assert!(prompt.starts_with("You are a helpful AI financial assistant"));
        assert!(prompt.contains("Current Financial Data:\nFinancial Summary:"));
    }
}
