//! Calibration table model.
//!
//! [`CalibrationTable`] holds the breakpoint axes, the `fuel_base` grid, and
//! the power enrichment (PE) enable vectors of a tune, validated once at load
//! time. [`axis_index`] maps a measured value onto a breakpoint cell and is
//! shared by both axes.
//!
//! ```text
//!               load_axis[0]  load_axis[1]  ...
//! rpm_axis[0]   fuel_base[0][0]  fuel_base[0][1]
//! rpm_axis[1]   fuel_base[1][0]  fuel_base[1][1]
//!   ...
//! ```

mod axis;
mod calibration;
mod grid;

pub use axis::axis_index;
pub use calibration::{CalibrationTable, Cell, EnableThresholds, TableParts};
pub use grid::Grid;
