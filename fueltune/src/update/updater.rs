//! Bounded `fuel_base` updates.
//!
//! # Idempotence
//!
//! The new table always starts from the source table's `fuel_base`, and
//! every limit is measured against the source value of the cell. The result
//! depends only on the source table and the summaries, never on a previously
//! written output, so rerunning an update reproduces the same table instead
//! of compounding changes.

use super::modification::{pending_modifications, ClampedModification, Modification};
use crate::analysis::CellSummary;
use crate::config::DEFAULT_CHANGE_LIMIT_PCT;
use crate::table::CalibrationTable;

/// Result of applying modifications to a source table.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelBaseUpdate {
    /// New table snapshot; only its `fuel_base` differs from the source.
    pub table: CalibrationTable,
    /// Modifications written to the grid, clamped or not.
    pub applied: usize,
    /// Modifications left at the source value.
    pub skipped: usize,
    /// Modifications capped at the change limit, in cell order.
    pub clamped: Vec<ClampedModification>,
}

/// Applies summary suggestions to a source table within a change limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableUpdater {
    change_limit_pct: f64,
}

impl Default for TableUpdater {
    fn default() -> Self {
        Self::new(DEFAULT_CHANGE_LIMIT_PCT)
    }
}

impl TableUpdater {
    /// Create an updater allowing at most `change_limit_pct` percent change
    /// per cell. The sign is ignored.
    pub fn new(change_limit_pct: f64) -> Self {
        Self {
            change_limit_pct: change_limit_pct.abs(),
        }
    }

    pub fn change_limit_pct(&self) -> f64 {
        self.change_limit_pct
    }

    /// Build a new table from the source table and both summary sets.
    ///
    /// The source table is left untouched.
    pub fn apply(
        &self,
        source: &CalibrationTable,
        enriched: &[CellSummary],
        closed_loop: &[CellSummary],
    ) -> FuelBaseUpdate {
        let mut update = FuelBaseUpdate {
            table: source.clone(),
            applied: 0,
            skipped: 0,
            clamped: Vec::new(),
        };

        for modification in pending_modifications(enriched, closed_loop).into_values() {
            if self.apply_one(source, &modification, &mut update) {
                update.applied += 1;
            } else {
                update.skipped += 1;
            }
        }

        tracing::debug!(
            applied = update.applied,
            skipped = update.skipped,
            clamped = update.clamped.len(),
            limit_pct = self.change_limit_pct,
            "Computed fuel_base update"
        );

        update
    }

    fn apply_one(
        &self,
        source: &CalibrationTable,
        modification: &Modification,
        update: &mut FuelBaseUpdate,
    ) -> bool {
        let cell = modification.cell;
        let Some(source_value) = source.value(cell.rpm_idx, cell.load_idx) else {
            tracing::warn!(cell = %cell, "Modification outside fuel_base, skipping");
            return false;
        };

        let suggested = modification.suggested_value;
        if source_value == 0.0 || !suggested.is_finite() {
            tracing::warn!(
                cell = %cell,
                source_value,
                suggested,
                "Cannot express change as a percentage, leaving source value"
            );
            return false;
        }

        let change_pct = (suggested - source_value) / source_value * 100.0;
        let value = if change_pct.abs() > self.change_limit_pct {
            let limit = self.change_limit_pct.copysign(change_pct) / 100.0;
            let clamped_value = source_value * (1.0 + limit);
            update.clamped.push(ClampedModification {
                cell,
                rpm: source.rpm_at(cell.rpm_idx).unwrap_or(f64::NAN),
                load: source.load_at(cell.load_idx).unwrap_or(f64::NAN),
                source_value,
                suggested_value: suggested,
                clamped_value,
                change_pct,
                regime: modification.regime,
            });
            clamped_value
        } else {
            suggested
        };

        update.table.set_value(cell.rpm_idx, cell.load_idx, value)
    }
}
