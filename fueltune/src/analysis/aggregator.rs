//! Per-cell aggregation of classified samples.

use std::collections::BTreeMap;

use super::classifier::Regime;
use super::prepare::ClassifiedSample;
use super::stats::MetricStats;
use crate::table::{CalibrationTable, Cell};

/// Aggregated statistics for one table cell within one regime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSummary {
    pub regime: Regime,
    pub cell: Cell,
    /// RPM breakpoint at the start of the cell.
    pub rpm: f64,
    /// Load breakpoint at the start of the cell.
    pub load: f64,
    /// Statistics of the regime's metric: lambda ratio for enriched cells,
    /// combined trim (%) for closed-loop cells.
    pub stats: MetricStats,
    /// `fuel_base` value currently in the table.
    pub current_value: f64,
    pub suggested_value: f64,
}

impl CellSummary {
    /// Fueling error in percent.
    ///
    /// `(mean_ratio - 1) * 100` for enriched cells, the mean trim for
    /// closed-loop cells. Summaries are ranked by its magnitude.
    pub fn error_pct(&self) -> f64 {
        match self.regime {
            Regime::Enriched => (self.stats.mean - 1.0) * 100.0,
            Regime::ClosedLoop => self.stats.mean,
        }
    }

    pub fn samples(&self) -> usize {
        self.stats.count
    }
}

/// Groups samples by cell and summarizes cells with enough data.
#[derive(Debug, Clone, Copy)]
pub struct CellAggregator {
    min_samples: usize,
}

impl CellAggregator {
    /// Create an aggregator dropping cells with fewer than `min_samples` hits.
    pub fn new(min_samples: usize) -> Self {
        Self { min_samples }
    }

    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Summarize the samples of `regime`, worst cells first.
    ///
    /// Samples of the other regime are ignored. Cells with equal error keep
    /// ascending `(rpm_idx, load_idx)` order.
    pub fn summarize(
        &self,
        table: &CalibrationTable,
        regime: Regime,
        samples: &[ClassifiedSample],
    ) -> Vec<CellSummary> {
        let mut groups: BTreeMap<Cell, Vec<f64>> = BTreeMap::new();
        for sample in samples.iter().filter(|s| s.regime == regime) {
            if let Some(metric) = sample.metric() {
                groups.entry(sample.cell).or_default().push(metric);
            }
        }

        let mut summaries: Vec<CellSummary> = groups
            .into_iter()
            .filter(|(_, values)| values.len() >= self.min_samples)
            .filter_map(|(cell, values)| self.summarize_cell(table, regime, cell, &values))
            .collect();

        summaries.sort_by(|a, b| b.error_pct().abs().total_cmp(&a.error_pct().abs()));

        tracing::debug!(
            regime = %regime,
            cells = summaries.len(),
            min_samples = self.min_samples,
            "Summarized cells"
        );

        summaries
    }

    fn summarize_cell(
        &self,
        table: &CalibrationTable,
        regime: Regime,
        cell: Cell,
        values: &[f64],
    ) -> Option<CellSummary> {
        let stats = MetricStats::from_values(values)?;
        let current_value = table.value(cell.rpm_idx, cell.load_idx)?;
        let suggested_value = match regime {
            Regime::Enriched => current_value * stats.mean,
            Regime::ClosedLoop => current_value * (1.0 + stats.mean / 100.0),
        };

        Some(CellSummary {
            regime,
            cell,
            rpm: table.rpm_at(cell.rpm_idx)?,
            load: table.load_at(cell.load_idx)?,
            stats,
            current_value,
            suggested_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datalog::Sample;
    use crate::table::TableParts;

    fn table() -> CalibrationTable {
        CalibrationTable::from_parts(TableParts {
            rpm_axis: vec![1000.0, 3000.0, 5000.0],
            load_axis: vec![0.5, 1.0],
            fuel_base: vec![vec![10.0, 12.0], vec![14.0, 16.0], vec![18.0, 20.0]],
            enable_load: vec![0.4, 0.4, 0.4],
            enable_tps: vec![20.0, 20.0, 20.0],
            delay_counter: vec![10.0],
            delay_axis: vec![2000.0],
        })
        .unwrap()
    }

    fn enriched(cell: Cell, ratio: f64) -> ClassifiedSample {
        ClassifiedSample {
            sample: blank(),
            cell,
            regime: Regime::Enriched,
            combined_trim: 0.0,
            lambda_ratio: Some(ratio),
        }
    }

    fn closed(cell: Cell, trim: f64) -> ClassifiedSample {
        ClassifiedSample {
            sample: blank(),
            cell,
            regime: Regime::ClosedLoop,
            combined_trim: trim,
            lambda_ratio: None,
        }
    }

    fn blank() -> Sample {
        Sample {
            log_index: 0,
            time_s: 0.0,
            load: 0.0,
            rpm: 0.0,
            lambda_actual: 1.0,
            lambda_target: 1.0,
            stft: 0.0,
            ltft: 0.0,
            throttle: 0.0,
        }
    }

    #[test]
    fn test_enriched_summary_values() {
        let cell = Cell::new(1, 1);
        let samples = vec![enriched(cell, 1.02), enriched(cell, 1.04), enriched(cell, 1.06)];
        let out = CellAggregator::new(1).summarize(&table(), Regime::Enriched, &samples);

        assert_eq!(out.len(), 1);
        let s = out[0];
        assert_eq!(s.samples(), 3);
        assert_eq!(s.rpm, 3000.0);
        assert_eq!(s.load, 1.0);
        assert_eq!(s.current_value, 16.0);
        assert!((s.stats.mean - 1.04).abs() < 1e-9);
        assert!((s.stats.median - 1.04).abs() < 1e-9);
        assert!((s.error_pct() - 4.0).abs() < 1e-9);
        assert!((s.suggested_value - 16.64).abs() < 1e-9);
    }

    #[test]
    fn test_closed_loop_suggestion_scales_by_trim() {
        let cell = Cell::new(0, 0);
        let samples = vec![closed(cell, 4.0), closed(cell, 6.0)];
        let out = CellAggregator::new(2).summarize(&table(), Regime::ClosedLoop, &samples);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].error_pct(), 5.0);
        assert!((out[0].suggested_value - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_cells_below_min_samples_dropped() {
        assert_eq!(CellAggregator::new(2).min_samples(), 2);
        let samples = vec![
            closed(Cell::new(0, 0), 1.0),
            closed(Cell::new(0, 0), 1.0),
            closed(Cell::new(2, 1), 1.0),
        ];
        let out = CellAggregator::new(2).summarize(&table(), Regime::ClosedLoop, &samples);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].cell, Cell::new(0, 0));
    }

    #[test]
    fn test_other_regime_ignored() {
        let samples = vec![enriched(Cell::new(0, 0), 1.1), closed(Cell::new(0, 1), 2.0)];
        let out = CellAggregator::new(1).summarize(&table(), Regime::Enriched, &samples);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].regime, Regime::Enriched);
    }

    #[test]
    fn test_sorted_by_error_magnitude() {
        let samples = vec![
            closed(Cell::new(0, 0), 1.0),
            closed(Cell::new(1, 0), -8.0),
            closed(Cell::new(2, 0), 3.0),
        ];
        let out = CellAggregator::new(1).summarize(&table(), Regime::ClosedLoop, &samples);
        let cells: Vec<Cell> = out.iter().map(|s| s.cell).collect();
        assert_eq!(cells, vec![Cell::new(1, 0), Cell::new(2, 0), Cell::new(0, 0)]);
    }

    #[test]
    fn test_enriched_sorted_by_error_magnitude() {
        let samples = vec![
            enriched(Cell::new(0, 0), 1.02),
            enriched(Cell::new(1, 0), 1.05),
            enriched(Cell::new(2, 1), 0.90),
        ];
        let out = CellAggregator::new(1).summarize(&table(), Regime::Enriched, &samples);

        let cells: Vec<Cell> = out.iter().map(|s| s.cell).collect();
        assert_eq!(cells, vec![Cell::new(2, 1), Cell::new(1, 0), Cell::new(0, 0)]);
        assert!((out[0].error_pct() + 10.0).abs() < 1e-9);
        assert!((out[1].error_pct() - 5.0).abs() < 1e-9);
        assert!((out[2].error_pct() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_cell_order() {
        let samples = vec![
            closed(Cell::new(2, 1), 2.0),
            closed(Cell::new(0, 1), -2.0),
            closed(Cell::new(1, 0), 2.0),
        ];
        let out = CellAggregator::new(1).summarize(&table(), Regime::ClosedLoop, &samples);
        let cells: Vec<Cell> = out.iter().map(|s| s.cell).collect();
        assert_eq!(cells, vec![Cell::new(0, 1), Cell::new(1, 0), Cell::new(2, 1)]);
    }

    #[test]
    fn test_no_samples() {
        let out = CellAggregator::new(1).summarize(&table(), Regime::Enriched, &[]);
        assert!(out.is_empty());
    }
}
