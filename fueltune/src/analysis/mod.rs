//! Fueling analysis.
//!
//! Turns datalog samples into per-cell fueling error summaries:
//!
//! ```text
//! Sample ──► prepare_samples ──► ClassifiedSample ──► CellAggregator ──► CellSummary
//!              (cell lookup,        (cell, regime,       (group by cell,
//!               ModeClassifier)      metric)              min_samples, stats)
//! ```
//!
//! Enriched samples are measured by the wideband: the ratio of measured to
//! commanded lambda says how far `fuel_base` is off. Closed-loop samples are
//! measured by the fuel trims the controller applied to reach stoichiometry.

mod aggregator;
mod classifier;
mod pipeline;
mod prepare;
mod stats;

pub use aggregator::{CellAggregator, CellSummary};
pub use classifier::{ModeClassifier, Regime};
pub use pipeline::{analyze, Analysis};
pub use prepare::{prepare_samples, ClassifiedSample, PreparationStats};
pub use stats::{percentile, MetricStats};
