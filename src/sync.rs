use log::info;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::aggregate;
use crate::dates;
use crate::error::{Error, Result};
use crate::models::{BudgetRow, Expense, NewExpense};
use crate::sheet::SheetStore;

/// Bring the cached budget row for `month` back in line with the expense
/// log: read the current row (synthesizing a zero-allocation one when the
/// month has none), recompute spend from a full scan, persist the result.
///
/// Re-running this is idempotent — the persisted figures are a pure
/// function of the log and the allocation.
pub(crate) fn recompute(store: &SheetStore, month: &str) -> Result<BudgetRow> {
    let budgets = store.list_budgets()?;
    let mut row = budgets
        .into_iter()
        .find(|b| b.month == month)
        .unwrap_or_else(|| BudgetRow::zeroed(month));

    let activity = aggregate::aggregate(store, month)?;
    row.total_spent = activity.total_spent;
    row.remaining_budget = row.total_budget - activity.total_spent;
    row.last_updated = dates::iso_timestamp();

    info!(
        "recalculated budget for {month}: spent {} / budget {}",
        row.total_spent, row.total_budget
    );

    store.upsert_budget(&row)?;
    Ok(row)
}

/// Append a new expense and refresh its month's budget cache. The month
/// key is derived from the date before the append so the two can never
/// disagree on a written row.
///
/// The append and the recompute are separate remote writes; a crash in
/// between leaves the cache stale until the next mutation for that month
/// triggers a fresh recompute.
pub(crate) fn record_expense(store: &SheetStore, input: NewExpense) -> Result<Expense> {
    let month = dates::month_from_date(&input.date)?;

    let expense = Expense {
        id: Uuid::new_v4().to_string(),
        date: input.date,
        member_name: input.member_name,
        category: input.category,
        description: input.description,
        amount: input.amount,
        month: month.clone(),
        created_at: dates::iso_timestamp(),
    };

    store.append_expense(&expense)?;
    recompute(store, &month)?;
    Ok(expense)
}

/// Set the allocation for `month`, creating the row if absent (with
/// spent 0 and remaining equal to the allocation as the initial guess),
/// then run a full recompute so the persisted figures reflect the real
/// log rather than the guess.
pub(crate) fn set_budget(store: &SheetStore, month: &str, total_budget: Decimal) -> Result<BudgetRow> {
    if !dates::is_valid_month(month) {
        return Err(Error::Validation(format!(
            "invalid month key: {month} (expected YYYY-MM)"
        )));
    }
    if total_budget < Decimal::ZERO {
        return Err(Error::Validation(
            "total budget must be non-negative".into(),
        ));
    }

    let budgets = store.list_budgets()?;
    let row = match budgets.into_iter().find(|b| b.month == month) {
        Some(mut existing) => {
            existing.total_budget = total_budget;
            existing
        }
        None => BudgetRow {
            month: month.to_string(),
            total_budget,
            total_spent: Decimal::ZERO,
            remaining_budget: total_budget,
            last_updated: dates::iso_timestamp(),
        },
    };
    store.upsert_budget(&row)?;

    recompute(store, month)
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
