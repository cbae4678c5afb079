//! The `split` operation: divide one file into equal parts.

use crate::config::SplitConfig;
use crate::io::csv::read_dataset;
use crate::planner::{InsufficientRows, PartitionPlan};
use crate::writer_pool::{WrittenPartition, write_partitions};
use anyhow::Result;
use std::sync::Arc;

/// How a split run ended.
#[derive(Debug)]
pub enum SplitOutcome {
    /// Every partition was written.
    Written(Vec<WrittenPartition>),
    /// The file had fewer rows than parts; nothing was written.
    Skipped(InsufficientRows),
}

/// Read `cfg.source` and write `cfg.parts` files next to it.
///
/// Each output receives the header (in header mode) followed by a contiguous
/// slice of rows; concatenating the outputs in index order gives back the
/// source rows.
///
/// # Errors
/// Returns an error if the source cannot be read or parsed, or if any output
/// fails to be written.
pub fn split_file(cfg: &SplitConfig) -> Result<SplitOutcome> {
    let dataset = read_dataset(&cfg.source, &cfg.csv)?;
    log::info!("read {} rows from {}", dataset.len(), cfg.source.display());

    let plan = match PartitionPlan::new(dataset.len(), cfg.parts) {
        Ok(plan) => plan,
        Err(skip) => return Ok(SplitOutcome::Skipped(skip)),
    };
    log::info!("partition sizes: {:?}", plan.sizes());

    let threads = cfg.worker_threads();
    log::info!("writing {} parts with {} threads", plan.parts(), threads);
    let written = write_partitions(&cfg.source, Arc::new(dataset), &plan, cfg.csv, threads)?;
    Ok(SplitOutcome::Written(written))
}
