//! Command-line argument definitions for the csv-manager CLI.

use crate::config::{CsvOptions, Delimiter, MAX_PARTS, MIN_PARTS, ShuffleConfig, SplitConfig};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "csv-manager", version)]
#[command(about = "Manage your csv files in different ways")]
#[command(
    long_about = "Divide CSV files into equal parts, randomize your file,
perform other operations with CSV files"
)]
pub struct Cli {
    /// Enable verbose progress output with timestamps
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Divide CSV file into equal parts
    #[command(alias = "divide")]
    #[command(
        long_about = "Divide a CSV file into the number of equal parts.
Parts are written next to the source as 001.<name>, 002.<name>, ..."
    )]
    Split(SplitArgs),

    /// Shuffle lines in file
    #[command(long_about = "Shuffle lines in the file provided.
The file is rewritten in place; use --backup to keep the original as <name>.old")]
    Shuffle(ShuffleArgs),
}

/// Options shared by every subcommand that reads a CSV file.
#[derive(Args, Debug)]
pub struct CsvArgs {
    /// Path to the CSV file
    pub path: PathBuf,

    /// Use if file contains a header line with field names
    #[arg(short = 'f', long)]
    pub field_names: bool,

    /// Single character to be used as delimiter
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: Delimiter,
}

impl CsvArgs {
    fn options(&self) -> CsvOptions {
        CsvOptions {
            delimiter: self.delimiter,
            has_headers: self.field_names,
        }
    }
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    #[command(flatten)]
    pub csv: CsvArgs,

    /// Amount of equal parts to divide a file. Should be between 2 and 999
    #[arg(short, long, default_value_t = 2, value_parser = parse_amount)]
    pub amount: usize,

    /// Number of writer threads (defaults to twice the CPU count, capped at the amount)
    #[arg(short, long)]
    pub threads: Option<usize>,
}

impl SplitArgs {
    /// # Errors
    /// Returns an error if the source path does not exist.
    pub fn into_config(self) -> Result<SplitConfig> {
        Ok(SplitConfig::new(self.csv.path.clone(), self.amount, self.csv.options())?
            .with_threads(self.threads))
    }
}

#[derive(Args, Debug)]
pub struct ShuffleArgs {
    #[command(flatten)]
    pub csv: CsvArgs,

    /// Use this option if you need to backup an original file
    #[arg(short, long)]
    pub backup: bool,

    /// Seed for a reproducible shuffle
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl ShuffleArgs {
    /// # Errors
    /// Returns an error if the source path does not exist.
    pub fn into_config(self) -> Result<ShuffleConfig> {
        Ok(ShuffleConfig::new(self.csv.path.clone(), self.csv.options(), self.backup)?
            .with_seed(self.seed))
    }
}

/// Parse the `--delimiter` value.
pub fn parse_delimiter(s: &str) -> Result<Delimiter, String> {
    s.parse::<Delimiter>().map_err(|e| e.to_string())
}

/// Parse the `--amount` value, enforcing the supported range.
pub fn parse_amount(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(MIN_PARTS..=MAX_PARTS).contains(&n) {
        return Err(format!(
            "Invalid value for parts amount. Should be between {MIN_PARTS} and {MAX_PARTS}"
        ));
    }
    Ok(n)
}
