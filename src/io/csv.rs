//! CSV reading and writing over untyped rows.
//!
//! This module provides:
//! - **Whole-file ingestion** into a [`Dataset`]: [`read_dataset`]
//! - **Row writers** honoring the shared [`CsvOptions`]: [`write_rows`], [`create_csv_writer`]
//!
//! # Design notes
//! - Rows are kept as [`csv::StringRecord`]; no field is parsed or validated.
//! - The header row is never handed to the `csv` crate's own header handling.
//!   It is split off manually so it can be re-emitted verbatim in front of
//!   every output file.
//! - Readers are strict: every row must have the same number of fields.
//! - Writers must go through [`finish_writer`]; a compressed stream is only
//!   complete once its trailing frame has been written.

use crate::config::CsvOptions;
use crate::io::compression::{Codec, CompressedWriter, auto_detect_writer, detect_reader};
use anyhow::{Context, Result, anyhow};
use csv::{ReaderBuilder, StringRecord, Writer, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A fully buffered delimited file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    /// Field names, present only when header mode is on and the file is not empty.
    pub header: Option<StringRecord>,
    /// Data rows in file order.
    pub rows: Vec<StringRecord>,
    /// Compression the source was stored with; rewritten files reuse it.
    pub codec: Option<Codec>,
}

impl Dataset {
    /// Number of data rows (header excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read a delimited file fully into memory.
///
/// * When `opts.has_headers` is `true`, the first record becomes
///   [`Dataset::header`] and is excluded from [`Dataset::rows`].
/// * Compressed inputs are decoded transparently.
///
/// # Errors
/// Returns an error if the file cannot be opened, or if any record is
/// malformed or has a field count different from the first record.
pub fn read_dataset(path: impl AsRef<Path>, opts: &CsvOptions) -> Result<Dataset> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let (rdr, codec) = detect_reader(f, path)
        .with_context(|| format!("setup decompression for {}", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(opts.delimiter.as_byte())
        .from_reader(rdr);

    let mut header = None;
    let mut rows = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("parse CSV record #{} of {}", i + 1, path.display()))?;
        if opts.has_headers && i == 0 {
            header = Some(rec);
        } else {
            rows.push(rec);
        }
    }
    Ok(Dataset { header, rows, codec })
}

/// Create `path` and wrap it in a CSV writer using the configured delimiter.
///
/// The destination is truncated if it already exists. `codec` is applied
/// when given; otherwise the file name decides, as on read.
///
/// # Errors
/// Returns an error if the file cannot be created.
pub fn create_csv_writer(
    path: impl AsRef<Path>,
    opts: &CsvOptions,
    codec: Option<Codec>,
) -> Result<Writer<CompressedWriter<File>>> {
    let path = path.as_ref();
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let w = match codec {
        Some(c) => CompressedWriter::new(f, Some(c))
            .with_context(|| format!("wrap writer with {} codec", c.name())),
        None => auto_detect_writer(f, path),
    }
    .with_context(|| format!("setup compression for {}", path.display()))?;
    Ok(WriterBuilder::new()
        .has_headers(false)
        .delimiter(opts.delimiter.as_byte())
        .from_writer(w))
}

/// Write an optional header followed by `rows` to a freshly created `path`.
///
/// The stream is finished and the file closed before this returns.
///
/// # Returns
/// The number of data rows written (header excluded).
///
/// # Errors
/// Returns an error if the file cannot be created or any row fails to write.
pub fn write_rows<'a>(
    path: impl AsRef<Path>,
    opts: &CsvOptions,
    codec: Option<Codec>,
    header: Option<&StringRecord>,
    rows: impl IntoIterator<Item = &'a StringRecord>,
) -> Result<usize> {
    let path = path.as_ref();
    let mut wtr = create_csv_writer(path, opts, codec)?;
    if let Some(h) = header {
        wtr.write_record(h)
            .with_context(|| format!("write header to {}", path.display()))?;
    }
    let mut n = 0usize;
    for row in rows {
        wtr.write_record(row)
            .with_context(|| format!("write CSV row #{} to {}", n + 1, path.display()))?;
        n += 1;
    }
    finish_writer(wtr, path)?;
    Ok(n)
}

/// Flush a CSV writer, finish its compression stream and hand back the sink.
///
/// When the sink is a [`File`], dropping the returned value closes it.
///
/// # Errors
/// Returns an error if buffered data, or the trailing frame of a compressed
/// stream, cannot be written out.
pub fn finish_writer<W: Write>(wtr: Writer<CompressedWriter<W>>, path: &Path) -> Result<W> {
    let inner = wtr
        .into_inner()
        .map_err(|e| anyhow!("flush {}: {}", path.display(), e.error()))?;
    inner
        .finish()
        .with_context(|| format!("finish {}", path.display()))
}
