//! State file handling: the CLI's stand-in for a real storage backend.
//!
//! The core is storage-agnostic; the CLI persists a [`StoreSnapshot`]
//! as JSON under `.weft/state.json` (overridable via `--state` or
//! `WEFT_STATE`) so that separate invocations see each other's writes.

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use weft_core::{MemoryStore, StoreSnapshot};

/// Default state file path, relative to the working directory.
const DEFAULT_STATE_PATH: &str = ".weft/state.json";

/// Resolve the state file path: flag, then env, then default.
#[must_use]
pub fn resolve_path(flag: Option<&str>) -> PathBuf {
    flag.map(PathBuf::from)
        .or_else(|| env::var("WEFT_STATE").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH))
}

/// Load the store from the state file; a missing file is an empty
/// store.
///
/// # Errors
///
/// Fails if the file exists but cannot be read or parsed.
pub fn load(path: &Path) -> Result<MemoryStore> {
    if !path.exists() {
        return Ok(MemoryStore::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read state file {}", path.display()))?;
    let snapshot: StoreSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse state file {}", path.display()))?;
    Ok(MemoryStore::from_snapshot(snapshot))
}

/// Write the store back to the state file, creating parent
/// directories as needed.
///
/// # Errors
///
/// Fails if the snapshot cannot be taken or the file cannot be
/// written.
pub fn save(path: &Path, store: &MemoryStore) -> Result<()> {
    let snapshot = store
        .snapshot()
        .context("failed to snapshot store for saving")?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write state file {}", path.display()))?;
    Ok(())
}
