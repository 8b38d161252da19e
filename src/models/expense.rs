use rust_decimal::Decimal;

use super::Category;

/// One immutable row of the expense log. Rows are never updated or deleted
/// individually; only the archival process removes them, in bulk.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: String,
    /// Canonical form `DD/MM/YYYY`.
    pub date: String,
    pub member_name: String,
    pub category: Category,
    pub description: String,
    pub amount: Decimal,
    /// Always the `YYYY-MM` of `date`; the two must never disagree.
    pub month: String,
    pub created_at: String,
}

/// Caller-supplied fields of an expense before insertion. The id, month
/// and timestamp are filled in on the write path.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub date: String,
    pub member_name: String,
    pub category: Category,
    pub description: String,
    pub amount: Decimal,
}
