//! # csv-manager
//!
//! Split delimited text files into equal parts and shuffle their rows in place.
//!
//! ## Operations
//!
//! ### Split
//! [`split_file`] reads a whole file, plans how many rows each of N outputs
//! receives ([`PartitionPlan`]), and writes the outputs concurrently
//! ([`writer_pool`]). Output `i` is named `<folder>/<NNN>.<fileName>`:
//!
//! ```no_run
//! use csv_manager::*;
//! # fn main() -> anyhow::Result<()> {
//! let csv = CsvOptions { has_headers: true, ..CsvOptions::default() };
//! let cfg = SplitConfig::new("data/a.csv", 3, csv)?;
//! match split_file(&cfg)? {
//!     SplitOutcome::Written(parts) => println!("{} files", parts.len()),
//!     SplitOutcome::Skipped(why) => println!("{why}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! A file with fewer rows than parts is not an error: the run ends with
//! [`SplitOutcome::Skipped`] and nothing is written.
//!
//! ### Shuffle
//! [`shuffle_file`] writes the rows in a uniformly random order
//! ([`Permutation`]) to `<folder>/tmp.<fileName>`, then moves it over the
//! source ([`atomic_replace`]), optionally keeping `<source>.old`:
//!
//! ```no_run
//! use csv_manager::*;
//! # fn main() -> anyhow::Result<()> {
//! let cfg = ShuffleConfig::new("data/a.csv", CsvOptions::default(), true)?.with_seed(Some(7));
//! let report = shuffle_file(&cfg)?;
//! assert!(report.backup.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `compression-gzip` - read and write `.gz` files transparently
//! - `compression-zstd` - read and write `.zst` files transparently
//!
//! ## Module Overview
//!
//! - [`config`] - immutable run configuration and argument validation
//! - [`io`] - CSV datasets and compression codecs
//! - [`planner`] - partition sizes for `split`
//! - [`writer_pool`] - concurrent partition writers
//! - [`permutation`] - random row orderings for `shuffle`
//! - [`replace`] - swapping a rewritten file into place
//! - [`paths`] - names of generated files
//! - [`cli`] - command-line definitions
//! - [`logging`] - stderr logger setup

pub mod cli;
pub mod config;
pub mod io;
pub mod logging;
pub mod paths;
pub mod permutation;
pub mod planner;
pub mod replace;
pub mod shuffle;
pub mod split;
pub mod writer_pool;

pub use config::{CsvOptions, Delimiter, MAX_PARTS, MIN_PARTS, ShuffleConfig, SplitConfig};
pub use io::csv::{Dataset, read_dataset, write_rows};
pub use permutation::Permutation;
pub use planner::{InsufficientRows, PartitionPlan};
pub use replace::atomic_replace;
pub use shuffle::{ShuffleReport, shuffle_file};
pub use split::{SplitOutcome, split_file};
pub use writer_pool::{WrittenPartition, write_partitions};
