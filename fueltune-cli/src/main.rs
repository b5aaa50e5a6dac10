//! fueltune CLI - Command-line interface
//!
//! Compares engine datalogs against a tune file, prints per-cell fueling
//! summaries, and optionally writes a tune with a corrected `fuel_base`.

mod commands;
mod error;
mod report;

use std::io;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::analyze::AnalyzeArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "fueltune", version = fueltune::VERSION, about = "Fueling analysis for engine tunes", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze open and closed loop fueling and refine fuel_base
    Analyze(AnalyzeArgs),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "fueltune",
            "analyze",
            "--tune",
            "tune.json",
            "--logs",
            "a.csv",
            "b.csv",
            "--output-tune",
            "out.json",
            "--change-limit",
            "3.5",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        let Commands::Analyze(args) = cli.command;
        assert_eq!(args.tune, PathBuf::from("tune.json"));
        assert_eq!(args.logs, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
        assert_eq!(args.output_tune, Some(PathBuf::from("out.json")));
        assert_eq!(args.change_limit, Some(3.5));
        assert_eq!(args.min_samples, None);
    }

    #[test]
    fn test_logs_required() {
        assert!(Cli::try_parse_from(["fueltune", "analyze", "--tune", "tune.json"]).is_err());
    }

    #[test]
    fn test_modify_tune_requires_output_tune() {
        let result = Cli::try_parse_from([
            "fueltune",
            "analyze",
            "--tune",
            "t.json",
            "--logs",
            "a.csv",
            "--modify-tune",
            "m.json",
        ]);
        assert!(result.is_err());
    }
}
