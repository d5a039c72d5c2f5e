// ── Inventory loader ──
//
// The serial list is externally maintained (one serial per line, UTF-8)
// and re-read at the start of every cycle so edits take effect without a
// restart. Lines are trimmed; empty lines are preserved here and skipped
// by the reconciler, so a blank line can never match anything.

use std::path::Path;

use tracing::debug;

use crate::error::CoreError;

/// Read the inventory file into trimmed lines.
///
/// An unreadable file is fatal to the current cycle.
pub fn load(path: &Path) -> Result<Vec<String>, CoreError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CoreError::Inventory {
        path: path.to_path_buf(),
        source,
    })?;

    let entries: Vec<String> = raw.lines().map(|line| line.trim().to_owned()).collect();
    debug!(path = %path.display(), entries = entries.len(), "inventory loaded");
    Ok(entries)
}
