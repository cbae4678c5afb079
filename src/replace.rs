//! Replacing a file with a fully written sibling.

use crate::paths::backup_path;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Move `replacement` onto `original`.
///
/// Both files must already be closed. With `backup` set, `original` is first
/// renamed to `<original>.old` (replacing any previous backup) and that path
/// is returned. Without it, the rename of `replacement` itself discards the
/// old content, so `original` is never absent.
///
/// # Errors
/// Returns an error if either rename fails. If the backup rename succeeded
/// but the final rename did not, the original content is still at the
/// backup path.
pub fn atomic_replace(original: &Path, replacement: &Path, backup: bool) -> Result<Option<PathBuf>> {
    let saved = if backup {
        let old = backup_path(original);
        fs::rename(original, &old)
            .with_context(|| format!("rename {} to {}", original.display(), old.display()))?;
        log::info!("original saved to {}", old.display());
        Some(old)
    } else {
        None
    };

    fs::rename(replacement, original).with_context(|| {
        format!("rename {} to {}", replacement.display(), original.display())
    })?;
    Ok(saved)
}
