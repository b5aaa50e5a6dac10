//! fueltune - Fueling analysis and `fuel_base` refinement for engine tunes
//!
//! This library compares datalogged engine behavior against a calibration
//! tune, measures how far the `fuel_base` table is off in each cell, and
//! writes a corrected tune with every change capped relative to the source tune.
//!
//! # Pipeline
//!
//! ```text
//! tune.json ──► TuneFile ──► CalibrationTable ─┐
//!                                              ├─► analyze ──► Analysis ──► TableUpdater ──► updated.json
//! log*.csv ──► DatalogReader ──► Sample ───────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use fueltune::analysis::analyze;
//! use fueltune::config::AnalysisConfig;
//! use fueltune::datalog::DatalogReader;
//! use fueltune::table::CalibrationTable;
//! use fueltune::update::{update_tune_file, TableUpdater, UpdatePaths};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AnalysisConfig::default();
//! let table = CalibrationTable::load(Path::new("tune.json"))?;
//! let samples = DatalogReader::default().read_all(&["pull1.csv", "cruise.csv"])?;
//!
//! let analysis = analyze(&table, &samples, &config);
//!
//! let paths = UpdatePaths::new("tune.json", "tune_updated.json");
//! let updater = TableUpdater::new(config.change_limit_pct);
//! let report = update_tune_file(&paths, &updater, &analysis.enriched, &analysis.closed_loop)?;
//! println!("{} cells updated", report.applied);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod datalog;
pub mod table;
pub mod tune;
pub mod update;

/// Version of the fueltune library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
