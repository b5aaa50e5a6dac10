//! The `analyze` command.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use fueltune::analysis::analyze;
use fueltune::config::{AnalysisConfig, ConfigFile};
use fueltune::datalog::DatalogReader;
use fueltune::table::CalibrationTable;
use fueltune::update::{update_tune_file, TableUpdater, UpdatePaths};

use crate::error::CliError;
use crate::report;

/// Arguments for `fueltune analyze`.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Tune file (JSON) the datalogs were recorded with
    #[arg(long)]
    pub tune: PathBuf,

    /// One or more CSV datalogs
    #[arg(long, num_args = 1.., required = true)]
    pub logs: Vec<PathBuf>,

    /// Save the Markdown summary to this path
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Write a tune with an updated fuel_base table to this path
    #[arg(long)]
    pub output_tune: Option<PathBuf>,

    /// Tune to use as the template for --output-tune instead of --tune
    #[arg(long, requires = "output_tune")]
    pub modify_tune: Option<PathBuf>,

    /// Minimum samples per cell before it is reported [default: 5]
    #[arg(long)]
    pub min_samples: Option<usize>,

    /// Maximum fuel_base change per cell, in percent of the --tune value [default: 5.0]
    #[arg(long)]
    pub change_limit: Option<f64>,

    /// Configuration file (INI) [default: ~/.fueltune/config.ini]
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the analysis and, when requested, write the summary and updated tune.
pub fn run(args: AnalyzeArgs) -> Result<(), CliError> {
    let config = match &args.config {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    let settings = resolve_settings(&args, &config.analysis)?;

    let table = CalibrationTable::load(&args.tune)?;
    let samples = DatalogReader::new(config.columns).read_all(&args.logs)?;
    let analysis = analyze(&table, &samples, &settings);

    let summary = report::render_summary(&analysis);
    if let Some(path) = &args.output {
        write_summary(path, &summary)?;
    }
    println!("{}", summary);

    if let Some(output_tune) = &args.output_tune {
        let mut paths = UpdatePaths::new(&args.tune, output_tune);
        if let Some(modify) = &args.modify_tune {
            paths = paths.with_modify_tune(modify);
        }

        let updater = TableUpdater::new(settings.change_limit_pct);
        let update = update_tune_file(&paths, &updater, &analysis.enriched, &analysis.closed_loop)?;
        print!("{}", report::render_update(&update));
    }

    Ok(())
}

/// Merge command line flags over the configuration file settings.
fn resolve_settings(args: &AnalyzeArgs, file: &AnalysisConfig) -> Result<AnalysisConfig, CliError> {
    let settings = AnalysisConfig::default()
        .with_min_samples(args.min_samples.unwrap_or(file.min_samples))
        .with_change_limit_pct(args.change_limit.unwrap_or(file.change_limit_pct));

    if !settings.change_limit_pct.is_finite() || settings.change_limit_pct < 0.0 {
        return Err(CliError::Config(format!(
            "--change-limit must be a non-negative percentage, got {}",
            settings.change_limit_pct
        )));
    }
    Ok(settings)
}

fn write_summary(path: &Path, summary: &str) -> Result<(), CliError> {
    let write_err = |source| CliError::Report {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }
    fs::write(path, summary).map_err(write_err)?;

    tracing::info!(path = %path.display(), "Wrote summary");
    Ok(())
}
