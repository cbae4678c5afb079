//! Concurrent fan-out of partition writers.
//!
//! One task per partition is spawned on a dedicated `rayon` pool. Tasks own a
//! disjoint row range of a shared, read-only [`Dataset`] and a distinct output
//! file, so they never coordinate. Each task reports its result on a channel;
//! the caller drains exactly one message per partition (a counting join, in
//! whatever order tasks finish), then reports every failure at once.
//!
//! Outputs written by tasks that succeeded are left on disk when a sibling
//! fails.

use crate::config::CsvOptions;
use crate::io::csv::{Dataset, write_rows};
use crate::paths::partition_path;
use crate::planner::PartitionPlan;
use anyhow::{Context, Result, anyhow, bail};
use rayon::ThreadPoolBuilder;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc;

/// A partition file that was fully written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrittenPartition {
    /// 1-based partition index, as used in the file name.
    pub index: usize,
    pub path: PathBuf,
    /// Data rows written (header excluded).
    pub rows: usize,
}

/// Message sent by a writer task when it finishes.
struct Completion {
    index: usize,
    result: Result<WrittenPartition>,
}

fn write_partition(
    index: usize,
    source: &Path,
    dataset: &Dataset,
    range: Range<usize>,
    csv: &CsvOptions,
) -> Result<WrittenPartition> {
    let path = partition_path(source, index)?;
    log::debug!("writing rows {}..{} to {}", range.start, range.end, path.display());
    let rows = write_rows(
        &path,
        csv,
        dataset.codec,
        dataset.header.as_ref(),
        &dataset.rows[range],
    )?;
    Ok(WrittenPartition { index, path, rows })
}

/// Write every partition of `plan` concurrently, using at most `threads` workers.
///
/// Output names derive from `source`; see [`partition_path`].
///
/// # Returns
/// The written partitions ordered by index.
///
/// # Errors
/// Returns an aggregated error listing every partition that failed. Other
/// partitions are still written and kept.
pub fn write_partitions(
    source: &Path,
    dataset: Arc<Dataset>,
    plan: &PartitionPlan,
    csv: CsvOptions,
    threads: usize,
) -> Result<Vec<WrittenPartition>> {
    if plan.total() != dataset.len() {
        bail!(
            "partition plan covers {} rows but the dataset holds {}",
            plan.total(),
            dataset.len()
        );
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .thread_name(|i| format!("csv-writer-{i}"))
        .build()
        .context("build writer thread pool")?;

    let parts = plan.parts();
    let (tx, rx) = mpsc::channel::<Completion>();
    for (i, range) in plan.ranges().enumerate() {
        let index = i + 1;
        let tx = tx.clone();
        let dataset = Arc::clone(&dataset);
        let source = source.to_path_buf();
        pool.spawn(move || {
            let result = write_partition(index, &source, &dataset, range, &csv);
            // The receiver only goes away if the caller stopped waiting.
            let _ = tx.send(Completion { index, result });
        });
    }
    drop(tx);

    let mut written = Vec::with_capacity(parts);
    let mut failures = Vec::new();
    for _ in 0..parts {
        let done = rx
            .recv()
            .map_err(|_| anyhow!("a writer task exited without reporting completion"))?;
        match done.result {
            Ok(p) => {
                log::debug!("partition {:03} done ({} rows)", p.index, p.rows);
                written.push(p);
            }
            Err(e) => {
                log::error!("partition {:03} failed: {e:#}", done.index);
                failures.push((done.index, e));
            }
        }
    }

    if !failures.is_empty() {
        failures.sort_by_key(|(index, _)| *index);
        let detail = failures
            .iter()
            .map(|(index, e)| format!("partition {index:03}: {e:#}"))
            .collect::<Vec<_>>()
            .join("; ");
        bail!("{} of {} partition writers failed: {}", failures.len(), parts, detail);
    }

    written.sort_by_key(|p| p.index);
    Ok(written)
}
