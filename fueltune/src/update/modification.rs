//! Pending and clamped cell modifications.

use std::collections::BTreeMap;

use crate::analysis::{CellSummary, Regime};
use crate::table::Cell;

/// A proposed new `fuel_base` value for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modification {
    pub cell: Cell,
    pub suggested_value: f64,
    /// Regime whose summary proposed the change.
    pub regime: Regime,
}

impl From<&CellSummary> for Modification {
    fn from(summary: &CellSummary) -> Self {
        Self {
            cell: summary.cell,
            suggested_value: summary.suggested_value,
            regime: summary.regime,
        }
    }
}

/// A modification whose change exceeded the limit and was capped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampedModification {
    pub cell: Cell,
    pub rpm: f64,
    pub load: f64,
    /// Value in the source table.
    pub source_value: f64,
    /// Value the analysis asked for.
    pub suggested_value: f64,
    /// Value written to the table.
    pub clamped_value: f64,
    /// Requested change relative to the source value (%), before clamping.
    pub change_pct: f64,
    pub regime: Regime,
}

/// Merge both summary sets into one modification per cell.
///
/// Closed-loop suggestions go in first and enriched suggestions replace
/// them, so a cell seen in both regimes takes the enriched value.
pub fn pending_modifications(
    enriched: &[CellSummary],
    closed_loop: &[CellSummary],
) -> BTreeMap<Cell, Modification> {
    let mut pending = BTreeMap::new();
    for summary in closed_loop.iter().chain(enriched) {
        pending.insert(summary.cell, Modification::from(summary));
    }
    pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MetricStats;

    fn summary(regime: Regime, cell: Cell, suggested: f64) -> CellSummary {
        CellSummary {
            regime,
            cell,
            rpm: 0.0,
            load: 0.0,
            stats: MetricStats {
                count: 5,
                mean: 1.0,
                median: 1.0,
                p95: 1.0,
            },
            current_value: 10.0,
            suggested_value: suggested,
        }
    }

    #[test]
    fn test_enriched_wins_conflict() {
        let cell = Cell::new(1, 1);
        let enriched = [summary(Regime::Enriched, cell, 11.0)];
        let closed = [summary(Regime::ClosedLoop, cell, 9.0)];

        let pending = pending_modifications(&enriched, &closed);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[&cell].suggested_value, 11.0);
        assert_eq!(pending[&cell].regime, Regime::Enriched);
    }

    #[test]
    fn test_disjoint_cells_all_kept_in_order() {
        let enriched = [summary(Regime::Enriched, Cell::new(2, 0), 11.0)];
        let closed = [
            summary(Regime::ClosedLoop, Cell::new(1, 1), 9.0),
            summary(Regime::ClosedLoop, Cell::new(0, 1), 9.5),
        ];

        let pending = pending_modifications(&enriched, &closed);
        let cells: Vec<Cell> = pending.keys().copied().collect();
        assert_eq!(cells, vec![Cell::new(0, 1), Cell::new(1, 1), Cell::new(2, 0)]);
    }
}
