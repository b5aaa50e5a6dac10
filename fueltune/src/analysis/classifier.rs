//! Operating regime classification.
//!
//! # Detection Logic
//!
//! ```text
//! Enriched:    load >= pe_enable_load(rpm)
//!          AND throttle >= pe_enable_tps(rpm)
//!          AND lambda_target < 1.0
//! Closed-loop: otherwise
//! ```
//!
//! Thresholds come from the RPM cell containing the sample, clamped to the
//! ends of the RPM axis.
//!
//! # Known Approximation
//!
//! The controller only engages power enrichment after the enable conditions
//! have held for the number of cycles given by its `pe_delay` counters. This
//! classifier evaluates every sample on its own, with no memory of earlier
//! samples, so the first samples of a PE event are labelled enriched even
//! though the controller is still counting down. The delay maps are loaded
//! into [`CalibrationTable`] but not simulated.

use std::fmt;

use crate::datalog::Sample;
use crate::table::CalibrationTable;

/// Fueling regime of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Regime {
    /// Power enrichment (open loop).
    ///
    /// Fueling targets a rich lambda; the wideband error is the metric.
    Enriched,

    /// Closed loop.
    ///
    /// The controller trims toward lambda 1.0; the fuel trims are the metric.
    ClosedLoop,
}

impl Regime {
    /// Get a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Regime::Enriched => "open-loop power enrichment",
            Regime::ClosedLoop => "closed-loop fueling",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Enriched => write!(f, "enriched"),
            Regime::ClosedLoop => write!(f, "closed-loop"),
        }
    }
}

/// Labels samples with their fueling regime using the PE enable thresholds
/// of a calibration table.
#[derive(Debug, Clone, Copy)]
pub struct ModeClassifier<'a> {
    table: &'a CalibrationTable,
}

impl<'a> ModeClassifier<'a> {
    pub fn new(table: &'a CalibrationTable) -> Self {
        Self { table }
    }

    /// Classify one sample.
    ///
    /// Comparisons against NaN are false, so a sample with a missing
    /// load, throttle, or target is closed-loop.
    pub fn classify(&self, sample: &Sample) -> Regime {
        let thresholds = self.table.enable_thresholds(sample.rpm, true);

        let load_met = sample.load >= thresholds.load;
        let tps_met = sample.throttle >= thresholds.tps;
        let rich_target = sample.lambda_target < 1.0;

        if load_met && tps_met && rich_target {
            Regime::Enriched
        } else {
            Regime::ClosedLoop
        }
    }
}
