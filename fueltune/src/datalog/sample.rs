//! A single datalog row.

/// One datalog row.
///
/// Cells that were empty or not numeric in the log are NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Position of the source log in the list passed to the reader.
    pub log_index: usize,
    pub time_s: f64,
    /// Measured load (g/rev).
    pub load: f64,
    pub rpm: f64,
    /// Measured lambda from the wideband sensor.
    pub lambda_actual: f64,
    /// Commanded lambda.
    pub lambda_target: f64,
    /// Short-term fuel trim (%).
    pub stft: f64,
    /// Long-term fuel trim (%).
    pub ltft: f64,
    /// Throttle position (%).
    pub throttle: f64,
}

impl Sample {
    /// Whether RPM, load, and both lambda values are present.
    pub fn is_complete(&self) -> bool {
        !(self.rpm.is_nan()
            || self.load.is_nan()
            || self.lambda_actual.is_nan()
            || self.lambda_target.is_nan())
    }

    /// STFT + LTFT, counting a missing trim as zero.
    pub fn combined_trim(&self) -> f64 {
        let or_zero = |v: f64| if v.is_nan() { 0.0 } else { v };
        or_zero(self.stft) + or_zero(self.ltft)
    }
}
