//! Names of the files produced next to a source file.
//!
//! | Purpose           | Name                          |
//! |-------------------|-------------------------------|
//! | split output `i`  | `<folder>/<NNN>.<fileName>`   |
//! | shuffle temporary | `<folder>/tmp.<fileName>`     |
//! | shuffle backup    | `<source>.old`                |
//!
//! `NNN` is the 1-based partition index, zero-padded to three digits.

use anyhow::{Context, Result};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

fn file_name(source: &Path) -> Result<&OsStr> {
    source
        .file_name()
        .with_context(|| format!("{} does not name a file", source.display()))
}

fn sibling(source: &Path, prefix: &str) -> Result<PathBuf> {
    let mut name = OsString::from(prefix);
    name.push(file_name(source)?);
    Ok(source.with_file_name(name))
}

/// Path of the `index`-th (1-based) split output.
///
/// # Errors
/// Returns an error if `source` has no file name component.
pub fn partition_path(source: &Path, index: usize) -> Result<PathBuf> {
    sibling(source, &format!("{index:03}."))
}

/// Path of the temporary file `shuffle` writes before replacing the source.
///
/// # Errors
/// Returns an error if `source` has no file name component.
pub fn temp_path(source: &Path) -> Result<PathBuf> {
    sibling(source, "tmp.")
}

/// Path the original content is moved to when a backup is requested.
#[must_use]
pub fn backup_path(source: &Path) -> PathBuf {
    let mut p = source.as_os_str().to_owned();
    p.push(".old");
    PathBuf::from(p)
}
