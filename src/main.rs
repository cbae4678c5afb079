use clap::Parser;
use csv_manager::cli::{Cli, Commands};
use csv_manager::logging::init_logger;
use csv_manager::{SplitOutcome, shuffle_file, split_file};
use std::process::ExitCode;

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Split(args) => {
            let cfg = args.into_config()?;
            match split_file(&cfg)? {
                SplitOutcome::Written(parts) => {
                    for p in &parts {
                        log::info!("{} ({} rows)", p.path.display(), p.rows);
                    }
                    println!("New files created successfully");
                }
                SplitOutcome::Skipped(skip) => println!("{skip}"),
            }
        }
        Commands::Shuffle(args) => {
            let cfg = args.into_config()?;
            let report = shuffle_file(&cfg)?;
            log::info!("shuffled {} rows in {}", report.rows, cfg.source.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are reported through the same path.
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
