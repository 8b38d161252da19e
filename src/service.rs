use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

use crate::aggregate::{self, DailyTotal};
use crate::archive::{self, ArchivePolicy};
use crate::error::Result;
use crate::models::{BudgetRow, Expense, NewExpense};
use crate::sheet::SheetStore;
use crate::sync;

/// Everything a front end needs for one month, as one flat record.
///
/// The budget figures come from the cached budget row while the
/// breakdowns are recomputed live — the two can briefly disagree inside
/// the accepted eventual-consistency window.
#[derive(Debug, Clone)]
pub(crate) struct Dashboard {
    pub(crate) month: String,
    pub(crate) total_budget: Decimal,
    pub(crate) total_spent: Decimal,
    pub(crate) remaining_budget: Decimal,
    pub(crate) category_breakdown: BTreeMap<String, Decimal>,
    pub(crate) member_breakdown: BTreeMap<String, Decimal>,
    pub(crate) daily_totals: Vec<DailyTotal>,
}

/// Business-logic facade behind the routing layer. Callers arrive already
/// authenticated; nothing below this line looks at a PIN.
pub(crate) struct Tracker {
    store: Arc<SheetStore>,
    policy: ArchivePolicy,
}

impl Tracker {
    pub(crate) fn new(store: SheetStore, policy: ArchivePolicy) -> Self {
        Self {
            store: Arc::new(store),
            policy,
        }
    }

    /// Budget record for `month`, or a zero-valued default when none
    /// exists. Absence is never an error.
    pub(crate) fn get_budget_summary(&self, month: &str) -> Result<BudgetRow> {
        let budgets = self.store.list_budgets()?;
        Ok(budgets
            .into_iter()
            .find(|b| b.month == month)
            .unwrap_or_else(|| BudgetRow::zeroed(month)))
    }

    /// Create or update the month's allocation and return the refreshed
    /// record.
    pub(crate) fn set_budget(&self, month: &str, total_budget: Decimal) -> Result<BudgetRow> {
        sync::set_budget(&self.store, month, total_budget)
    }

    pub(crate) fn get_dashboard(&self, month: &str) -> Result<Dashboard> {
        let budget = self.get_budget_summary(month)?;
        let activity = aggregate::aggregate(&self.store, month)?;
        Ok(Dashboard {
            month: budget.month,
            total_budget: budget.total_budget,
            total_spent: budget.total_spent,
            remaining_budget: budget.remaining_budget,
            category_breakdown: activity.category_breakdown,
            member_breakdown: activity.member_breakdown,
            daily_totals: activity.daily_totals,
        })
    }

    /// Live expense rows for `month`, oldest first.
    pub(crate) fn list_expenses(&self, month: &str) -> Result<Vec<Expense>> {
        Ok(self
            .store
            .list_expenses()?
            .into_iter()
            .filter(|e| e.month == month)
            .collect())
    }

    /// Record an expense, then kick off an archival check in the
    /// background. The insert returns immediately; the check's outcome is
    /// visible only in the logs.
    pub(crate) fn add_expense(&self, input: NewExpense) -> Result<Expense> {
        let expense = sync::record_expense(&self.store, input)?;

        let store = Arc::clone(&self.store);
        let policy = self.policy.clone();
        thread::spawn(move || archive::check_and_archive(&store, &policy));

        Ok(expense)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
