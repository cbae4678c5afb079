//! Partition planning for `split`.
//!
//! A [`PartitionPlan`] says how many rows each output file receives. Rows
//! are dealt out as evenly as possible and any remainder goes to the
//! earliest partitions, so sizes never increase from one partition to the
//! next and never differ by more than one.

use std::error::Error;
use std::fmt;
use std::ops::Range;

/// Raised when a file has fewer rows than the number of requested parts.
///
/// This is an expected outcome, not a failure: the caller reports it and
/// writes nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsufficientRows {
    pub rows: usize,
    pub parts: usize,
}

impl fmt::Display for InsufficientRows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "File lines amount ({}) is smaller than requested parts ({})",
            self.rows, self.parts
        )
    }
}

impl Error for InsufficientRows {}

/// Row counts per destination file, in output order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionPlan {
    sizes: Vec<usize>,
}

impl PartitionPlan {
    /// Distribute `total` rows over `parts` partitions.
    ///
    /// # Errors
    /// Returns [`InsufficientRows`] when `total < parts`, which includes
    /// every empty input.
    pub fn new(total: usize, parts: usize) -> Result<Self, InsufficientRows> {
        if parts == 0 || total < parts {
            return Err(InsufficientRows { rows: total, parts });
        }
        let quotient = total / parts;
        let remainder = total % parts;
        let sizes = (0..parts)
            .map(|i| if i < remainder { quotient + 1 } else { quotient })
            .collect();
        Ok(Self { sizes })
    }

    #[must_use]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Number of partitions.
    #[must_use]
    pub fn parts(&self) -> usize {
        self.sizes.len()
    }

    /// Rows covered by the plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.sizes.iter().sum()
    }

    /// Contiguous row ranges, one per partition, covering `[0, total)` in order.
    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.sizes.iter().scan(0usize, |start, &len| {
            let r = *start..*start + len;
            *start = r.end;
            Some(r)
        })
    }
}
