//! Analysis settings.

/// Default minimum samples per cell before a summary is produced.
pub const DEFAULT_MIN_SAMPLES: usize = 5;

/// Default maximum `fuel_base` change per cell, in percent of the source value.
pub const DEFAULT_CHANGE_LIMIT_PCT: f64 = 5.0;

/// Settings for one analysis and update run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Cells with fewer samples are left out of the summaries.
    pub min_samples: usize,
    /// Largest change applied to a cell, as a percentage of its source value.
    pub change_limit_pct: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_samples: DEFAULT_MIN_SAMPLES,
            change_limit_pct: DEFAULT_CHANGE_LIMIT_PCT,
        }
    }
}

impl AnalysisConfig {
    /// Set the minimum sample count per cell.
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Set the per-cell change limit in percent.
    pub fn with_change_limit_pct(mut self, change_limit_pct: f64) -> Self {
        self.change_limit_pct = change_limit_pct;
        self
    }
}
