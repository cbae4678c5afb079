//! Immutable run configuration.
//!
//! Every operation receives its configuration by reference. Configs are
//! built once from validated command-line input and never mutated.

use anyhow::{Result, bail};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Smallest number of parts `split` accepts.
pub const MIN_PARTS: usize = 2;
/// Largest number of parts `split` accepts; output indices are three digits wide.
pub const MAX_PARTS: usize = 999;

/// A single-byte field delimiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delimiter(u8);

impl Delimiter {
    pub const COMMA: Delimiter = Delimiter(b',');

    /// Build a delimiter from an ASCII byte.
    ///
    /// # Errors
    /// Returns an error for non-ASCII bytes and for `"` and line breaks,
    /// which the CSV format reserves.
    pub fn new(byte: u8) -> Result<Self> {
        if !byte.is_ascii() {
            bail!("Delimiter should be a single ASCII character");
        }
        if matches!(byte, b'"' | b'\n' | b'\r') {
            bail!("Delimiter cannot be a quote or a line break");
        }
        Ok(Self(byte))
    }

    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self.0
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::COMMA
    }
}

impl FromStr for Delimiter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.as_bytes() {
            [b] => Self::new(*b),
            _ => bail!("Delimiter should only be one character long"),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 as char)
    }
}

/// Options shared by every reader and writer of a single run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: Delimiter,
    /// The first row holds field names and is carried over unchanged.
    pub has_headers: bool,
}

/// Configuration of the `split` operation.
#[derive(Clone, Debug)]
pub struct SplitConfig {
    pub source: PathBuf,
    pub parts: usize,
    pub csv: CsvOptions,
    /// Worker threads; `None` sizes the pool from the part count and CPU count.
    pub threads: Option<usize>,
}

impl SplitConfig {
    /// # Errors
    /// Returns an error if `source` does not exist or `parts` is out of range.
    pub fn new(source: impl Into<PathBuf>, parts: usize, csv: CsvOptions) -> Result<Self> {
        let source = source.into();
        validate_source(&source)?;
        validate_parts(parts)?;
        Ok(Self {
            source,
            parts,
            csv,
            threads: None,
        })
    }

    #[must_use]
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads.filter(|&t| t > 0);
        self
    }

    /// Number of worker threads for the writer pool.
    #[must_use]
    pub fn worker_threads(&self) -> usize {
        self.threads
            .unwrap_or_else(|| 2 * num_cpus::get().max(2))
            .clamp(1, self.parts.max(1))
    }
}

/// Configuration of the `shuffle` operation.
#[derive(Clone, Debug)]
pub struct ShuffleConfig {
    pub source: PathBuf,
    pub csv: CsvOptions,
    /// Keep the original content as `<source>.old`.
    pub backup: bool,
    /// Fixed RNG seed; `None` draws from the thread-local entropy source.
    pub seed: Option<u64>,
}

impl ShuffleConfig {
    /// # Errors
    /// Returns an error if `source` does not exist.
    pub fn new(source: impl Into<PathBuf>, csv: CsvOptions, backup: bool) -> Result<Self> {
        let source = source.into();
        validate_source(&source)?;
        Ok(Self {
            source,
            csv,
            backup,
            seed: None,
        })
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Check that `path` names an existing file.
///
/// # Errors
/// Returns an error if the path cannot be stat'ed or is a directory.
pub fn validate_source(path: &Path) -> Result<()> {
    match path.metadata() {
        Ok(m) if m.is_dir() => bail!("Provided path is a directory: {}", path.display()),
        Ok(_) => Ok(()),
        Err(_) => bail!("Provided path is invalid: {}", path.display()),
    }
}

/// Check that `parts` lies in `[MIN_PARTS, MAX_PARTS]`.
///
/// # Errors
/// Returns an error when out of range.
pub fn validate_parts(parts: usize) -> Result<()> {
    if !(MIN_PARTS..=MAX_PARTS).contains(&parts) {
        bail!("Invalid value for parts amount. Should be between {MIN_PARTS} and {MAX_PARTS}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_parses_single_ascii_char() {
        assert_eq!("|".parse::<Delimiter>().unwrap().as_byte(), b'|');
        assert_eq!("\t".parse::<Delimiter>().unwrap().as_byte(), b'\t');
        assert_eq!(Delimiter::default(), Delimiter::COMMA);
    }

    #[test]
    fn delimiter_rejects_bad_input() {
        assert!("".parse::<Delimiter>().is_err());
        assert!(";;".parse::<Delimiter>().is_err());
        assert!("é".parse::<Delimiter>().is_err());
        assert!("\"".parse::<Delimiter>().is_err());
    }

    #[test]
    fn parts_bounds() {
        assert!(validate_parts(1).is_err());
        assert!(validate_parts(2).is_ok());
        assert!(validate_parts(999).is_ok());
        assert!(validate_parts(1000).is_err());
    }

    #[test]
    fn worker_threads_never_exceed_parts() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let cfg = SplitConfig::new(tmp.path(), 3, CsvOptions::default())
            .unwrap()
            .with_threads(Some(64));
        assert_eq!(cfg.worker_threads(), 3);
        let cfg = cfg.with_threads(Some(0));
        assert!(cfg.threads.is_none());
        assert!(cfg.worker_threads() >= 1);
    }
}
