//! The calibration table model.

use std::fmt;
use std::path::Path;

use super::axis::{axis_index, first_non_ascending};
use super::Grid;
use crate::tune::{MapId, TuneError, TuneFile, TuneResult};

/// A `(rpm_idx, load_idx)` coordinate in the fuel table.
///
/// Ordering is by RPM row first, then load column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub rpm_idx: usize,
    pub load_idx: usize,
}

impl Cell {
    pub fn new(rpm_idx: usize, load_idx: usize) -> Self {
        Self { rpm_idx, load_idx }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rpm_idx, self.load_idx)
    }
}

/// Power enrichment enable thresholds at one RPM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnableThresholds {
    /// Minimum load (g/rev).
    pub load: f64,
    /// Minimum throttle position (%).
    pub tps: f64,
}

impl EnableThresholds {
    /// Thresholds no sample can meet.
    pub const NEVER: EnableThresholds = EnableThresholds {
        load: f64::INFINITY,
        tps: f64::INFINITY,
    };

    /// Whether these are the "never enabled" sentinel.
    pub fn is_never(&self) -> bool {
        self.load == f64::INFINITY && self.tps == f64::INFINITY
    }
}

/// Raw, unvalidated table data.
///
/// [`CalibrationTable::from_parts`] checks it against the table invariants.
#[derive(Debug, Clone, Default)]
pub struct TableParts {
    pub rpm_axis: Vec<f64>,
    pub load_axis: Vec<f64>,
    pub fuel_base: Vec<Vec<f64>>,
    pub enable_load: Vec<f64>,
    pub enable_tps: Vec<f64>,
    pub delay_counter: Vec<f64>,
    pub delay_axis: Vec<f64>,
}

/// Calibration axes and tables read from a tune file.
///
/// Invariants, checked at construction:
/// - every axis is non-empty and strictly ascending
/// - `fuel_base` is `rpm_axis.len()` rows by `load_axis.len()` columns
/// - `enable_load` and `enable_tps` have one entry per RPM breakpoint
/// - `delay_counter` has one entry per `delay_axis` breakpoint
///
/// Updates work on a clone, so a loaded table is never modified in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable {
    rpm_axis: Vec<f64>,
    load_axis: Vec<f64>,
    fuel_base: Grid,
    enable_load: Vec<f64>,
    enable_tps: Vec<f64>,
    delay_counter: Vec<f64>,
    delay_axis: Vec<f64>,
}

impl CalibrationTable {
    /// Validate raw parts into a table.
    pub fn from_parts(parts: TableParts) -> TuneResult<Self> {
        check_axis(MapId::RpmAxis, &parts.rpm_axis)?;
        check_axis(MapId::LoadAxis, &parts.load_axis)?;
        check_axis(MapId::DelayAxis, &parts.delay_axis)?;

        let expected_rows = parts.rpm_axis.len();
        let expected_cols = parts.load_axis.len();
        let bad_row = parts.fuel_base.iter().find(|r| r.len() != expected_cols);
        if parts.fuel_base.len() != expected_rows || bad_row.is_some() {
            let actual_cols = bad_row
                .or_else(|| parts.fuel_base.first())
                .map_or(0, Vec::len);
            return Err(TuneError::ShapeMismatch {
                id: MapId::FuelBase,
                actual_rows: parts.fuel_base.len(),
                actual_cols,
                expected_rows,
                expected_cols,
            });
        }
        let fuel_base = Grid::from_rows(&parts.fuel_base).ok_or(TuneError::EmptyMap {
            id: MapId::FuelBase,
        })?;

        check_length(MapId::EnableLoad, &parts.enable_load, MapId::RpmAxis, expected_rows)?;
        check_length(MapId::EnableTps, &parts.enable_tps, MapId::RpmAxis, expected_rows)?;
        check_length(
            MapId::DelayCounter,
            &parts.delay_counter,
            MapId::DelayAxis,
            parts.delay_axis.len(),
        )?;

        Ok(Self {
            rpm_axis: parts.rpm_axis,
            load_axis: parts.load_axis,
            fuel_base,
            enable_load: parts.enable_load,
            enable_tps: parts.enable_tps,
            delay_counter: parts.delay_counter,
            delay_axis: parts.delay_axis,
        })
    }

    /// Extract and validate the calibration maps of a tune file.
    pub fn from_tune(tune: &TuneFile) -> TuneResult<Self> {
        Self::from_parts(TableParts {
            rpm_axis: tune.vector(MapId::RpmAxis)?,
            load_axis: tune.vector(MapId::LoadAxis)?,
            fuel_base: tune.table(MapId::FuelBase)?,
            enable_load: tune.vector(MapId::EnableLoad)?,
            enable_tps: tune.vector(MapId::EnableTps)?,
            delay_counter: tune.vector(MapId::DelayCounter)?,
            delay_axis: tune.vector(MapId::DelayAxis)?,
        })
    }

    /// Load a tune file from disk and build its calibration table.
    pub fn load(path: &Path) -> TuneResult<Self> {
        let tune = TuneFile::load(path)?;
        let table = Self::from_tune(&tune)?;

        tracing::info!(
            path = %path.display(),
            rpm_breakpoints = table.rpm_axis.len(),
            load_breakpoints = table.load_axis.len(),
            "Loaded calibration table"
        );

        Ok(table)
    }

    pub fn fuel_base(&self) -> &Grid {
        &self.fuel_base
    }

    /// Fuel value at a cell.
    pub fn value(&self, rpm_idx: usize, load_idx: usize) -> Option<f64> {
        self.fuel_base.get(rpm_idx, load_idx)
    }

    /// Overwrite a fuel value. Returns `false` for a cell outside the grid.
    pub(crate) fn set_value(&mut self, rpm_idx: usize, load_idx: usize, value: f64) -> bool {
        self.fuel_base.set(rpm_idx, load_idx, value)
    }

    /// RPM breakpoint at the start of a row.
    pub fn rpm_at(&self, rpm_idx: usize) -> Option<f64> {
        self.rpm_axis.get(rpm_idx).copied()
    }

    /// Load breakpoint at the start of a column.
    pub fn load_at(&self, load_idx: usize) -> Option<f64> {
        self.load_axis.get(load_idx).copied()
    }

    /// Resolve an operating point to its cell, clamping both axes.
    pub fn cell_for(&self, rpm: f64, load: f64) -> Option<Cell> {
        let rpm_idx = axis_index(rpm, &self.rpm_axis, true)?;
        let load_idx = axis_index(load, &self.load_axis, true)?;
        Some(Cell::new(rpm_idx, load_idx))
    }

    /// PE enable thresholds for the RPM cell containing `rpm`.
    ///
    /// Returns [`EnableThresholds::NEVER`] when the RPM does not resolve:
    /// NaN, or outside the axis with `clamp` unset.
    pub fn enable_thresholds(&self, rpm: f64, clamp: bool) -> EnableThresholds {
        match axis_index(rpm, &self.rpm_axis, clamp) {
            Some(idx) => EnableThresholds {
                load: self.enable_load[idx],
                tps: self.enable_tps[idx],
            },
            None => EnableThresholds::NEVER,
        }
    }
}

fn check_axis(id: MapId, axis: &[f64]) -> TuneResult<()> {
    if axis.is_empty() {
        return Err(TuneError::EmptyMap { id });
    }
    match first_non_ascending(axis) {
        Some(index) => Err(TuneError::NotAscending { id, index }),
        None => Ok(()),
    }
}

fn check_length(id: MapId, values: &[f64], axis: MapId, expected: usize) -> TuneResult<()> {
    if values.len() != expected {
        return Err(TuneError::LengthMismatch {
            id,
            axis,
            actual: values.len(),
            expected,
        });
    }
    Ok(())
}
