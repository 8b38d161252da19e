use anyhow::{Context, Result};
use log::warn;
use std::env;
use std::path::PathBuf;

use crate::archive::ArchivePolicy;

const DEFAULT_MAX_ROWS: usize = 40_000;
const DEFAULT_ARCHIVE_CHUNK: usize = 30_000;

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    /// Shared family PIN checked by the authentication layer in front of
    /// the tracker. Held here so the whole surface is configured in one
    /// place; the core never compares PINs itself.
    pub(crate) family_pin: Option<String>,
    /// Admin PIN gating budget edits; same caveat as `family_pin`.
    pub(crate) admin_pin: Option<String>,
    pub(crate) workbook_path: PathBuf,
    pub(crate) archive: ArchivePolicy,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        let family_pin = env::var("FAMILY_PIN").ok().filter(|s| !s.is_empty());
        let admin_pin = env::var("ADMIN_PIN").ok().filter(|s| !s.is_empty());
        if family_pin.is_none() || admin_pin.is_none() {
            warn!("FAMILY_PIN or ADMIN_PIN not set in environment");
        }

        let data_dir = default_data_dir()?;
        let workbook_path = env::var("FAMLEDGER_WORKBOOK")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("famledger.db"));
        let archive_dir = env::var("FAMLEDGER_ARCHIVE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("archives"));

        Ok(Self {
            family_pin,
            admin_pin,
            workbook_path,
            archive: ArchivePolicy {
                max_rows: env_usize("FAMLEDGER_MAX_ROWS", DEFAULT_MAX_ROWS),
                archive_chunk: env_usize("FAMLEDGER_ARCHIVE_CHUNK", DEFAULT_ARCHIVE_CHUNK),
                dir: archive_dir,
            },
        })
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    match env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(v) => v,
            Err(_) => {
                warn!("{key}={raw} is not a number; using default {default}");
                default
            }
        },
        Err(_) => default,
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "famledger", "famledger")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir().to_path_buf();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir)
}
