use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::dates;
use crate::error::Result;
use crate::sheet::{schema, SheetStore};

/// Thresholds and destination for moving old expense rows to cold storage.
#[derive(Debug, Clone)]
pub(crate) struct ArchivePolicy {
    /// Live row count at which a run exports.
    pub(crate) max_rows: usize,
    /// How many of the oldest rows each run moves out. Deliberately
    /// smaller than `max_rows` so a run leaves headroom instead of
    /// re-triggering on every subsequent insert.
    pub(crate) archive_chunk: usize,
    pub(crate) dir: PathBuf,
}

/// Archival entry point for the insert path. Best effort: every failure
/// is logged and swallowed here, so the insert that triggered the check
/// never sees it. A failed run is simply retried on the next qualifying
/// insert.
pub(crate) fn check_and_archive(store: &SheetStore, policy: &ArchivePolicy) {
    match run_once(store, policy) {
        Ok(Some(path)) => info!("archival complete: {}", path.display()),
        Ok(None) => {}
        Err(e) => error!("archival failed: {e}"),
    }
}

/// One Check → Export → Persist → Purge pass. Returns the archive file
/// path when a chunk was moved, `None` when the log is below threshold
/// or the export slice came back empty.
pub(crate) fn run_once(store: &SheetStore, policy: &ArchivePolicy) -> Result<Option<PathBuf>> {
    let count = store.expense_count()?;
    info!(
        "archival check: {count} live rows (threshold {})",
        policy.max_rows
    );
    if count < policy.max_rows {
        return Ok(None);
    }

    // Export the oldest chunk: native rows 2..=chunk+1.
    let rows = store.raw_slice(2, policy.archive_chunk + 1)?;
    if rows.is_empty() {
        warn!("archival triggered but the export slice is empty; nothing to do");
        return Ok(None);
    }

    let path = write_archive(&policy.dir, &rows)?;
    info!("archived {} rows to {}", rows.len(), path.display());

    // Purge exactly the rows just exported. 0-based, header excluded.
    let deleted = store.delete_row_range(0, rows.len())?;
    info!("purged {deleted} rows from the live log");

    Ok(Some(path))
}

/// Write rows to a new timestamped file, header first. Once the purge
/// runs this file is the only remaining copy of the data, so it carries
/// its own column names.
fn write_archive(dir: &Path, rows: &[Vec<String>]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let timestamp = dates::iso_timestamp().replace([':', '.'], "-");
    let path = dir.join(format!("archive_expenses_{timestamp}.csv"));

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(schema::EXPENSES.columns)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(path)
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
