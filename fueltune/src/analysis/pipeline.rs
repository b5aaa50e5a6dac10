//! Full analysis pass: preparation, classification, and aggregation.

use super::aggregator::{CellAggregator, CellSummary};
use super::classifier::Regime;
use super::prepare::{prepare_samples, PreparationStats};
use crate::config::AnalysisConfig;
use crate::datalog::Sample;
use crate::table::CalibrationTable;

/// Result of one analysis pass.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// Enriched cells, largest error first.
    pub enriched: Vec<CellSummary>,
    /// Closed-loop cells, largest trim first.
    pub closed_loop: Vec<CellSummary>,
    pub stats: PreparationStats,
}

impl Analysis {
    /// Summaries for one regime.
    pub fn summaries(&self, regime: Regime) -> &[CellSummary] {
        match regime {
            Regime::Enriched => &self.enriched,
            Regime::ClosedLoop => &self.closed_loop,
        }
    }

    /// Whether neither regime produced a summary.
    pub fn is_empty(&self) -> bool {
        self.enriched.is_empty() && self.closed_loop.is_empty()
    }
}

/// Analyze datalog samples against a calibration table.
pub fn analyze(table: &CalibrationTable, samples: &[Sample], config: &AnalysisConfig) -> Analysis {
    let (prepared, stats) = prepare_samples(table, samples);
    let aggregator = CellAggregator::new(config.min_samples);

    let analysis = Analysis {
        enriched: aggregator.summarize(table, Regime::Enriched, &prepared),
        closed_loop: aggregator.summarize(table, Regime::ClosedLoop, &prepared),
        stats,
    };

    tracing::info!(
        samples = stats.total,
        retained = stats.retained(),
        enriched_cells = analysis.enriched.len(),
        closed_loop_cells = analysis.closed_loop.len(),
        "Analysis complete"
    );

    analysis
}
