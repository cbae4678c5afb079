//! Stderr logging for the csv-manager binary.

use env_logger::fmt::Formatter;
use log::{LevelFilter, Record};
use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// `[HH:MM:SS] LEVEL: message`, time counted from logger start.
fn format_record(buf: &mut Formatter, record: &Record<'_>) -> std::io::Result<()> {
    let secs = START_TIME.get().map_or(0, |t| t.elapsed().as_secs());
    writeln!(
        buf,
        "[{:02}:{:02}:{:02}] {}: {}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60,
        record.level(),
        record.args()
    )
}

/// Install the global logger.
///
/// `Info` with `verbose`, `Warn` otherwise; `RUST_LOG` takes precedence
/// per module.
pub fn init_logger(verbose: bool) {
    START_TIME.get_or_init(Instant::now);

    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(format_record)
        .target(env_logger::Target::Stderr)
        .init();
}
