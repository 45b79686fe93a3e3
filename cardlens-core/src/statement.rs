//! Statement records produced by the ingestion pipeline.
//!
//! All values are display strings, not parsed numbers. Wire field names are
//! camelCase to match the dashboard contract.

use serde::{Deserialize, Serialize};

/// Sentinel the extractor uses for summary fields it could not locate.
pub const NOT_FOUND: &str = "Not Found";

/// Summary fields of a credit-card statement.
///
/// Each value is either a formatted amount/date string or [`NOT_FOUND`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementSummary {
    pub total_balance: String,
    pub due_date: String,
    pub statement_date: String,
    pub last4_digits: String,
    pub min_payment: String,
    pub purchases_debit: String,
    pub payments_credits: String,
    pub total_credit_limit: String,
    pub available_credit_limit: String,
    pub available_cash_limit: String,
    pub previous_statement_dues: String,
}

impl Default for StatementSummary {
    fn default() -> Self {
        Self {
            total_balance: NOT_FOUND.to_string(),
            due_date: NOT_FOUND.to_string(),
            statement_date: NOT_FOUND.to_string(),
            last4_digits: NOT_FOUND.to_string(),
            min_payment: NOT_FOUND.to_string(),
            purchases_debit: NOT_FOUND.to_string(),
            payments_credits: NOT_FOUND.to_string(),
            total_credit_limit: NOT_FOUND.to_string(),
            available_credit_limit: NOT_FOUND.to_string(),
            available_cash_limit: NOT_FOUND.to_string(),
            previous_statement_dues: NOT_FOUND.to_string(),
        }
    }
}

/// A single statement transaction. Order is significant: display order equals
/// extraction order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub description: String,
    pub amount: String,
}

/// Output of the field extractor: summary fields plus the ordered
/// transaction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(flatten)]
    pub summary: StatementSummary,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Final response payload: extraction output merged with one category label
/// per transaction, positionally aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedResult {
    #[serde(flatten)]
    pub extraction: ExtractionResult,
    pub categories: Vec<String>,
}
