use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::schema::{self, Sheet};
use crate::error::{Error, Result};

/// The tabular backing store: sheets of untyped text cells with no schema
/// engine behind them. Rows are addressed by append order only, and a
/// position is not a stable identifier once deletions happen — callers
/// re-derive positions from a fresh scan before every positional write.
pub(crate) struct Workbook {
    conn: Mutex<Connection>,
}

impl Workbook {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            Error::StoreUnavailable(format!("failed to open workbook {}: {e}", path.display()))
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let book = Self {
            conn: Mutex::new(conn),
        };
        book.migrate()?;
        Ok(book)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let book = Self {
            conn: Mutex::new(conn),
        };
        book.migrate()?;
        Ok(book)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::StoreUnavailable("workbook connection poisoned".into()))
    }

    fn migrate(&self) -> Result<()> {
        let conn = self.conn()?;

        let has_version_table: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            conn.execute_batch(schema::SCHEMA_V1)?;
            conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    /// Append one row of cells. Missing trailing cells are stored empty;
    /// extras beyond the sheet's width are dropped.
    pub(crate) fn append_row(&self, sheet: &Sheet, cells: &[String]) -> Result<()> {
        let cols = quoted_columns(sheet);
        let placeholders: String = (1..=sheet.columns.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({cols}) VALUES ({placeholders})",
            sheet.table
        );

        let empty = String::new();
        let values: Vec<&dyn rusqlite::types::ToSql> = (0..sheet.columns.len())
            .map(|i| cells.get(i).unwrap_or(&empty) as &dyn rusqlite::types::ToSql)
            .collect();

        self.conn()?.execute(&sql, values.as_slice())?;
        Ok(())
    }

    /// All data rows in append order.
    pub(crate) fn rows(&self, sheet: &Sheet) -> Result<Vec<Vec<String>>> {
        self.slice(sheet, 0, None)
    }

    /// A contiguous run of data rows starting at a 0-based offset.
    pub(crate) fn slice(
        &self,
        sheet: &Sheet,
        offset: usize,
        limit: Option<usize>,
    ) -> Result<Vec<Vec<String>>> {
        let cols = quoted_columns(sheet);
        let limit_sql = limit.map(|l| l as i64).unwrap_or(-1);
        let sql = format!(
            "SELECT {cols} FROM {} ORDER BY pos LIMIT {limit_sql} OFFSET {offset}",
            sheet.table
        );

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let width = sheet.columns.len();
        let rows = stmt.query_map([], |row| {
            let mut cells = Vec::with_capacity(width);
            for i in 0..width {
                cells.push(row.get::<_, String>(i)?);
            }
            Ok(cells)
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn row_count(&self, sheet: &Sheet) -> Result<usize> {
        let count: i64 = self.conn()?.query_row(
            &format!("SELECT COUNT(*) FROM {}", sheet.table),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Overwrite the row at a 0-based position in place.
    pub(crate) fn update_row(&self, sheet: &Sheet, position: usize, cells: &[String]) -> Result<()> {
        let assignments: String = sheet
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("\"{c}\" = ?{}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {t} SET {assignments}
             WHERE pos = (SELECT pos FROM {t} ORDER BY pos LIMIT 1 OFFSET {position})",
            t = sheet.table
        );

        let empty = String::new();
        let values: Vec<&dyn rusqlite::types::ToSql> = (0..sheet.columns.len())
            .map(|i| cells.get(i).unwrap_or(&empty) as &dyn rusqlite::types::ToSql)
            .collect();

        let changed = self.conn()?.execute(&sql, values.as_slice())?;
        if changed == 0 {
            return Err(Error::StoreUnavailable(format!(
                "no row at position {position} in {}",
                sheet.table
            )));
        }
        Ok(())
    }

    /// Delete the contiguous run of data rows `[from, to)` by 0-based
    /// position. Returns how many rows were removed.
    pub(crate) fn delete_rows(&self, sheet: &Sheet, from: usize, to: usize) -> Result<usize> {
        if to <= from {
            return Ok(0);
        }
        let count = to - from;
        let sql = format!(
            "DELETE FROM {t}
             WHERE pos IN (SELECT pos FROM {t} ORDER BY pos LIMIT {count} OFFSET {from})",
            t = sheet.table
        );
        Ok(self.conn()?.execute(&sql, [])?)
    }
}

fn quoted_columns(sheet: &Sheet) -> String {
    sheet
        .columns
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
