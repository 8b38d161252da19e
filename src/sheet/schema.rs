/// A logical sheet in the workbook. The column order is part of the wire
/// contract with both the backing store and the archive file format.
pub(crate) struct Sheet {
    pub(crate) table: &'static str,
    pub(crate) columns: &'static [&'static str],
}

/// Append-only expense log.
pub(crate) const EXPENSES: Sheet = Sheet {
    table: "expenses",
    columns: &[
        "id",
        "date",
        "memberName",
        "category",
        "description",
        "amount",
        "month",
        "createdAt",
    ],
};

/// One row per month of budget allocation and derived totals.
pub(crate) const MONTHLY_BUDGETS: Sheet = Sheet {
    table: "monthly_budgets",
    columns: &[
        "month",
        "totalBudget",
        "totalSpent",
        "remainingBudget",
        "lastUpdated",
    ],
};

/// Every sheet is a table of plain text cells. `pos` only records append
/// order; a row's position among the live rows shifts as older rows are
/// deleted.
pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS expenses (
    pos             INTEGER PRIMARY KEY AUTOINCREMENT,
    "id"            TEXT NOT NULL DEFAULT '',
    "date"          TEXT NOT NULL DEFAULT '',
    "memberName"    TEXT NOT NULL DEFAULT '',
    "category"      TEXT NOT NULL DEFAULT '',
    "description"   TEXT NOT NULL DEFAULT '',
    "amount"        TEXT NOT NULL DEFAULT '',
    "month"         TEXT NOT NULL DEFAULT '',
    "createdAt"     TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS monthly_budgets (
    pos               INTEGER PRIMARY KEY AUTOINCREMENT,
    "month"           TEXT NOT NULL DEFAULT '',
    "totalBudget"     TEXT NOT NULL DEFAULT '',
    "totalSpent"      TEXT NOT NULL DEFAULT '',
    "remainingBudget" TEXT NOT NULL DEFAULT '',
    "lastUpdated"     TEXT NOT NULL DEFAULT ''
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
