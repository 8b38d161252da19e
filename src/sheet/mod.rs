mod normalize;
pub(crate) mod schema;
mod workbook;

use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{BudgetRow, Category, Expense};
use schema::{EXPENSES, MONTHLY_BUDGETS};
use workbook::Workbook;

/// The record store: the expense log and the monthly budget table exposed
/// as two logical collections over one workbook. Best-effort consistency
/// only — nothing here spans rows or tables atomically.
pub(crate) struct SheetStore {
    book: Workbook,
}

impl SheetStore {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            book: Workbook::open(path)?,
        })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        Ok(Self {
            book: Workbook::open_in_memory()?,
        })
    }

    // ── Expense log ───────────────────────────────────────────

    /// Append one expense row. Raw appends are serialized by the backing
    /// store, so concurrent submissions cannot clobber each other here.
    pub(crate) fn append_expense(&self, expense: &Expense) -> Result<()> {
        self.book.append_row(&EXPENSES, &expense_cells(expense))
    }

    /// Every live expense row, oldest first. Full scan; acceptable at the
    /// volumes the archival process keeps the log at.
    pub(crate) fn list_expenses(&self) -> Result<Vec<Expense>> {
        Ok(self
            .book
            .rows(&EXPENSES)?
            .iter()
            .map(|cells| expense_from_cells(cells))
            .collect())
    }

    pub(crate) fn expense_count(&self) -> Result<usize> {
        self.book.row_count(&EXPENSES)
    }

    /// Raw cell values for a contiguous expense range, addressed in the
    /// backing store's native 1-based row numbering (header = row 1, so
    /// the first data row is row 2). Values come back verbatim, with no
    /// normalization — this feeds the archive export.
    pub(crate) fn raw_slice(&self, from_row: usize, to_row: usize) -> Result<Vec<Vec<String>>> {
        if from_row < 2 || to_row < from_row {
            return Err(Error::Validation(format!(
                "bad raw row range {from_row}..{to_row}"
            )));
        }
        self.book
            .slice(&EXPENSES, from_row - 2, Some(to_row - from_row + 1))
    }

    /// Remove the expense rows `[from, to)` by 0-based position, row 0
    /// being the first data row past the header. Used only by archival.
    pub(crate) fn delete_row_range(&self, from: usize, to: usize) -> Result<usize> {
        self.book.delete_rows(&EXPENSES, from, to)
    }

    // ── Monthly budget table ──────────────────────────────────

    /// All budget rows in storage order.
    pub(crate) fn list_budgets(&self) -> Result<Vec<BudgetRow>> {
        Ok(self
            .book
            .rows(&MONTHLY_BUDGETS)?
            .iter()
            .map(|cells| budget_from_cells(cells))
            .collect())
    }

    /// Overwrite the row for `budget.month` in place, or append one if the
    /// month has no row yet. The row's position is re-derived from a fresh
    /// scan immediately before the write; a cached index is never trusted
    /// across calls.
    pub(crate) fn upsert_budget(&self, budget: &BudgetRow) -> Result<()> {
        let budgets = self.list_budgets()?;
        let cells = budget_cells(budget);
        match budgets.iter().position(|b| b.month == budget.month) {
            Some(idx) => self.book.update_row(&MONTHLY_BUDGETS, idx, &cells),
            None => self.book.append_row(&MONTHLY_BUDGETS, &cells),
        }
    }
}

// ── Cell mapping ──────────────────────────────────────────────
// Column order is the wire contract; see schema.rs.

fn cell(cells: &[String], idx: usize) -> String {
    cells.get(idx).cloned().unwrap_or_default()
}

fn expense_from_cells(cells: &[String]) -> Expense {
    Expense {
        id: cell(cells, 0),
        date: cell(cells, 1),
        member_name: cell(cells, 2),
        category: Category::parse(&cell(cells, 3)),
        description: cell(cells, 4),
        amount: normalize::parse_number(&cell(cells, 5)),
        month: cell(cells, 6),
        created_at: cell(cells, 7),
    }
}

fn expense_cells(e: &Expense) -> Vec<String> {
    vec![
        e.id.clone(),
        e.date.clone(),
        e.member_name.clone(),
        e.category.as_str().to_string(),
        e.description.clone(),
        e.amount.to_string(),
        e.month.clone(),
        e.created_at.clone(),
    ]
}

fn budget_from_cells(cells: &[String]) -> BudgetRow {
    BudgetRow {
        month: cell(cells, 0),
        total_budget: normalize::parse_number(&cell(cells, 1)),
        total_spent: normalize::parse_number(&cell(cells, 2)),
        remaining_budget: normalize::parse_number(&cell(cells, 3)),
        last_updated: cell(cells, 4),
    }
}

fn budget_cells(b: &BudgetRow) -> Vec<String> {
    vec![
        b.month.clone(),
        b.total_budget.to_string(),
        b.total_spent.to_string(),
        b.remaining_budget.to_string(),
        b.last_updated.clone(),
    ]
}
