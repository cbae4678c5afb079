//! The `shuffle` operation: permute the rows of a file in place.

use crate::config::ShuffleConfig;
use crate::io::compression::CompressedWriter;
use crate::io::csv::{Dataset, create_csv_writer, finish_writer, read_dataset};
use crate::paths::temp_path;
use crate::permutation::Permutation;
use crate::replace::atomic_replace;
use anyhow::{Context, Result};
use csv::Writer;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Summary of a completed shuffle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShuffleReport {
    /// Data rows written (header excluded).
    pub rows: usize,
    /// Where the original content was kept, when a backup was requested.
    pub backup: Option<PathBuf>,
}

/// Write the header and the permuted rows through `wtr`, finishing the stream.
fn write_shuffled(
    mut wtr: Writer<CompressedWriter<File>>,
    tmp: &Path,
    dataset: &Dataset,
    perm: &Permutation,
) -> Result<()> {
    if let Some(h) = &dataset.header {
        wtr.write_record(h)
            .with_context(|| format!("write header to {}", tmp.display()))?;
    }
    for (n, row) in perm.apply(&dataset.rows).enumerate() {
        log::trace!("{:?}", row);
        wtr.write_record(row)
            .with_context(|| format!("write CSV row #{} to {}", n + 1, tmp.display()))?;
    }
    finish_writer(wtr, tmp)?;
    Ok(())
}

/// Shuffle the rows of `cfg.source`.
///
/// Rows are written in random order to `tmp.<name>` next to the source, the
/// header (if any) first and unchanged. Once that file is flushed and closed
/// it replaces the source, optionally keeping the original as `<source>.old`.
/// A compressed source is rewritten with the same codec. If writing fails,
/// the partial temporary file is removed and the source is left untouched.
///
/// # Errors
/// Returns an error if the source cannot be read or parsed, or if the
/// temporary file cannot be written or moved into place.
pub fn shuffle_file(cfg: &ShuffleConfig) -> Result<ShuffleReport> {
    let source = cfg.source.as_path();
    let dataset = read_dataset(source, &cfg.csv)?;
    log::info!("read {} rows from {}", dataset.len(), source.display());

    let perm = Permutation::random(dataset.len(), cfg.seed);
    let tmp = temp_path(source)?;

    let wtr = create_csv_writer(&tmp, &cfg.csv, dataset.codec)?;
    if let Err(e) = write_shuffled(wtr, &tmp, &dataset, &perm) {
        if let Err(rm) = fs::remove_file(&tmp) {
            log::warn!("could not remove partial {}: {rm}", tmp.display());
        }
        return Err(e);
    }
    log::info!("shuffled rows written to {}", tmp.display());

    let backup = atomic_replace(source, &tmp, cfg.backup)?;
    Ok(ShuffleReport {
        rows: dataset.len(),
        backup,
    })
}
